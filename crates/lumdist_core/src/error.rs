use thiserror::Error;

/// Errors raised while validating parameters or running an integration
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LumdistError {
    #[error("invalid parameter `{name}` = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// E(z)^2 is not strictly positive, so its inverse square root is undefined
    #[error("expansion rate undefined at z = {redshift}: radicand {radicand} is not positive")]
    NumericOverflow { redshift: f64, radicand: f64 },

    #[error("integrand is not finite at x = {at}: {value}")]
    NonFiniteIntegrand { at: f64, value: f64 },

    /// An iterative method gave up; `iterations` counts its steps or evaluations
    #[error("did not converge after {iterations} iterations")]
    NoConvergence { iterations: u64 },

    #[error("value {value} outside tabulated range [{min}, {max}]")]
    OutOfRange { value: f64, min: f64, max: f64 },
}

pub type Result<T> = std::result::Result<T, LumdistError>;

impl LumdistError {
    pub fn invalid(name: &'static str, value: f64, reason: &'static str) -> Self {
        Self::InvalidParameter { name, value, reason }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_parameter() {
        let err = LumdistError::invalid("hubble_constant", -1.0, "must be positive");
        assert_eq!(
            err.to_string(),
            "invalid parameter `hubble_constant` = -1: must be positive"
        );

        let err = LumdistError::NumericOverflow { redshift: 0.0, radicand: 0.0 };
        assert!(err.to_string().contains("z = 0"), "{}", err);
    }
}
