/// The direction at which the scanner mirror was traveling at the time of pulse output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScanDirection {
    /// The scan is moving from the right to the left.
    #[default]
    RightToLeft,
    /// The scan is moving from the left to the right.
    LeftToRight,
}

impl From<bool> for ScanDirection {
    fn from(bit: bool) -> ScanDirection {
        if bit {
            ScanDirection::LeftToRight
        } else {
            ScanDirection::RightToLeft
        }
    }
}

impl From<ScanDirection> for bool {
    fn from(scan_direction: ScanDirection) -> bool {
        scan_direction == ScanDirection::LeftToRight
    }
}
