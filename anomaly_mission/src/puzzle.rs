use serde::Serialize;

/// What a rune placement attempt did to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapOutcome {
    /// Rune accepted; `latch_opened` is set on the placement that filled
    /// the final socket.
    Snapped { latch_opened: bool },
    Occupied,
    WrongGlyph,
    UnknownSocket,
}

#[derive(Debug, Clone, Serialize)]
struct RuneSocket {
    glyph: String,
    occupied: bool,
}

/// Socket board guarding the chest: each socket accepts one specific rune
/// glyph, and the latch opens exactly once when every socket is filled.
#[derive(Debug, Clone, Serialize)]
pub struct RuneBoard {
    sockets: Vec<RuneSocket>,
    latch_open: bool,
}

impl RuneBoard {
    pub fn new<I, S>(glyphs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        RuneBoard {
            sockets: glyphs
                .into_iter()
                .map(|glyph| RuneSocket {
                    glyph: glyph.into(),
                    occupied: false,
                })
                .collect(),
            latch_open: false,
        }
    }

    pub fn socket_count(&self) -> usize {
        self.sockets.len()
    }

    pub fn occupied_count(&self) -> usize {
        self.sockets.iter().filter(|socket| socket.occupied).count()
    }

    pub fn is_open(&self) -> bool {
        self.latch_open
    }

    /// Attempts to seat a rune. Wrong glyphs and already-filled sockets
    /// bounce without changing anything.
    pub fn place(&mut self, socket: usize, glyph: &str) -> SnapOutcome {
        let Some(slot) = self.sockets.get_mut(socket) else {
            return SnapOutcome::UnknownSocket;
        };
        if slot.occupied {
            return SnapOutcome::Occupied;
        }
        if slot.glyph != glyph {
            return SnapOutcome::WrongGlyph;
        }
        slot.occupied = true;

        let all_filled = self.sockets.iter().all(|socket| socket.occupied);
        let latch_opened = all_filled && !self.latch_open;
        if latch_opened {
            self.latch_open = true;
        }
        SnapOutcome::Snapped { latch_opened }
    }

    pub fn reset(&mut self) {
        for socket in &mut self.sockets {
            socket.occupied = false;
        }
        self.latch_open = false;
    }
}

/// Result of an ordered-combination check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SequenceVerdict {
    Incomplete,
    Mismatch,
    Solved,
}

/// Indexed slots checked against an expected tag order. Evaluation waits
/// until every slot holds a piece, then compares position by position.
#[derive(Debug, Clone, Serialize)]
pub struct SequencePuzzle {
    slots: Vec<Option<String>>,
    expected: Vec<String>,
    solved: bool,
}

impl SequencePuzzle {
    pub fn new<I, S>(expected: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let expected: Vec<String> = expected.into_iter().map(Into::into).collect();
        SequencePuzzle {
            slots: vec![None; expected.len()],
            expected,
            solved: false,
        }
    }

    pub fn is_solved(&self) -> bool {
        self.solved
    }

    /// Drops a piece into a slot (replacing whatever was there) and
    /// re-evaluates once the board is full.
    pub fn set_piece(&mut self, index: usize, tag: impl Into<String>) -> SequenceVerdict {
        if let Some(slot) = self.slots.get_mut(index) {
            *slot = Some(tag.into());
        }
        self.evaluate()
    }

    pub fn evaluate(&mut self) -> SequenceVerdict {
        if self.slots.iter().any(Option::is_none) {
            return SequenceVerdict::Incomplete;
        }
        let matches = self
            .slots
            .iter()
            .zip(&self.expected)
            .all(|(slot, expected)| slot.as_deref() == Some(expected.as_str()));
        if matches {
            self.solved = true;
            SequenceVerdict::Solved
        } else {
            SequenceVerdict::Mismatch
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{RuneBoard, SequencePuzzle, SequenceVerdict, SnapOutcome};

    fn board() -> RuneBoard {
        RuneBoard::new(["I", "II", "III", "IV"])
    }

    #[test]
    fn wrong_glyph_bounces() {
        let mut board = board();
        assert_eq!(board.place(0, "IV"), SnapOutcome::WrongGlyph);
        assert_eq!(board.occupied_count(), 0);
    }

    #[test]
    fn occupied_socket_rejects_a_second_rune() {
        let mut board = board();
        assert_eq!(
            board.place(0, "I"),
            SnapOutcome::Snapped {
                latch_opened: false
            }
        );
        assert_eq!(board.place(0, "I"), SnapOutcome::Occupied);
        assert_eq!(board.occupied_count(), 1);
    }

    #[test]
    fn latch_opens_once_on_the_final_placement() {
        let mut board = board();
        board.place(0, "I");
        board.place(1, "II");
        board.place(2, "III");
        assert!(!board.is_open());
        assert_eq!(
            board.place(3, "IV"),
            SnapOutcome::Snapped { latch_opened: true }
        );
        assert!(board.is_open());

        board.reset();
        assert!(!board.is_open());
        assert_eq!(board.occupied_count(), 0);
    }

    #[test]
    fn out_of_range_socket_is_reported() {
        let mut board = board();
        assert_eq!(board.place(9, "I"), SnapOutcome::UnknownSocket);
    }

    #[test]
    fn sequence_waits_for_a_full_board() {
        let mut puzzle = SequencePuzzle::new(["bear", "wolf", "hawk"]);
        assert_eq!(puzzle.set_piece(0, "bear"), SequenceVerdict::Incomplete);
        assert_eq!(puzzle.set_piece(2, "hawk"), SequenceVerdict::Incomplete);
        assert_eq!(puzzle.set_piece(1, "wolf"), SequenceVerdict::Solved);
        assert!(puzzle.is_solved());
    }

    #[test]
    fn sequence_is_order_sensitive() {
        let mut puzzle = SequencePuzzle::new(["bear", "wolf", "hawk"]);
        puzzle.set_piece(0, "wolf");
        puzzle.set_piece(1, "bear");
        assert_eq!(puzzle.set_piece(2, "hawk"), SequenceVerdict::Mismatch);
        assert!(!puzzle.is_solved());

        puzzle.set_piece(0, "bear");
        assert_eq!(puzzle.set_piece(1, "wolf"), SequenceVerdict::Solved);
    }
}
