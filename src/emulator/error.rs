use thiserror::Error;

/// Why a program could not be loaded. Nothing is executed after one of these.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not read program: {0}")]
    Io(#[from] std::io::Error),

    #[error("program is {size} bytes, but only {max} bytes fit in memory")]
    RomTooLarge { size: usize, max: usize },
}

/// A misbehaving program. These never stop execution; the offending
/// instruction becomes a no-op and the fault is kept for the host to inspect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Fault {
    #[error("stack overflow: no room for return address {return_address:#05x}")]
    StackOverflow { return_address: u16 },

    #[error("stack underflow: return with no caller")]
    StackUnderflow,
}
