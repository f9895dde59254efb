#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum OracleError {
    /// Requested time predates the oldest stored observation
    OracleTooOld,
    /// Buffer has no observations yet
    Uninitialized,
}
