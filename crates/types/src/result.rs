/// Outcome of one verification run as seen from outside the lock.
///
/// `error_code` is the only observable output: 0 on success, a distinct
/// negative value per failure kind otherwise.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(C)]
pub struct Result {
    pub success: bool,
    pub error_code: i8,
}

impl Result {
    pub const fn new(success: bool, error_code: i8) -> Self {
        Self { success, error_code }
    }

    pub const fn ok() -> Self {
        Self::new(true, 0)
    }

    pub const fn failure(error_code: i8) -> Self {
        Self::new(false, error_code)
    }

    /// Process exit status for the runner binary.
    pub fn exit_code(&self) -> i32 {
        self.error_code as i32
    }
}
