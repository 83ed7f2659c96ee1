//! Errors raised when mapping names and codes onto the counter tables

pub type Result<T> = std::result::Result<T, RawError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RawError {
    #[error("Unknown {category} name: {name:?}")]
    UnknownName { category: &'static str, name: String },

    #[error("Unknown {category} code: {code}")]
    UnknownCode { category: &'static str, code: u64 },

    #[error("Invalid config 0x{config:X} for perf type {perf_type}")]
    InvalidConfig { perf_type: u32, config: u64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_error_display() {
        let err = RawError::UnknownName {
            category: "hardware counter",
            name: "CPU_CYCLE".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Unknown hardware counter name: \"CPU_CYCLE\""
        );

        let err = RawError::InvalidConfig {
            perf_type: 3,
            config: 0x1_0000_0000,
        };
        assert!(err.to_string().contains("0x100000000"));
    }
}
