//! Internal module for validating JSON numbers

/// Consumes the JSON number starting at `start`
///
/// Returns `None` if the number is invalid and `Some(end)` if the number is valid, where `end`
/// is the index (exclusive) of the last byte of the number. A number which is directly followed
/// by further number chars, such as `01` or `1.2.3`, is considered invalid as a whole.
pub(crate) fn consume_json_number(bytes: &[u8], start: usize) -> Option<usize> {
    #[derive(PartialEq, Clone, Copy)]
    enum State {
        Start,
        Minus,
        IntZero,
        IntNonZero,
        DecimalPoint,
        DecimalDigit,
        ExpE,
        ExpSign,
        ExpDigit,
    }

    let mut index = start;
    let mut state = State::Start;
    // Used to track unexpected trailing number chars, to detect the whole number
    // as invalid, e.g. "01"
    let mut has_trailing_number_chars = false;

    while let Some(&byte) = bytes.get(index) {
        state = match (state, byte) {
            (State::Start, b'-') => State::Minus,
            (State::ExpE, b'-' | b'+') => State::ExpSign,

            (State::Start | State::Minus, b'0') => State::IntZero,
            (State::Start | State::Minus | State::IntNonZero, b'0'..=b'9') => State::IntNonZero,
            (State::DecimalPoint | State::DecimalDigit, b'0'..=b'9') => State::DecimalDigit,
            (State::ExpE | State::ExpSign | State::ExpDigit, b'0'..=b'9') => State::ExpDigit,

            (State::IntZero | State::IntNonZero, b'.') => State::DecimalPoint,
            (State::IntZero | State::IntNonZero | State::DecimalDigit, b'e' | b'E') => State::ExpE,

            (_, b'-' | b'+' | b'.' | b'e' | b'E' | b'0'..=b'9') => {
                has_trailing_number_chars = true;
                break;
            }
            // Any other byte ends the number
            _ => break,
        };
        index += 1;
    }

    if has_trailing_number_chars
        || !matches!(
            state,
            State::IntZero | State::IntNonZero | State::DecimalDigit | State::ExpDigit
        )
    {
        None
    } else {
        Some(index)
    }
}
