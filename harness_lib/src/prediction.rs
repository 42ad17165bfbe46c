/// How much context the parser's adaptive prediction uses to pick alternatives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PredictionMode {
    /// Strong LL: ignores the rule invocation stack. Fastest, may reject valid input.
    Sll,
    /// Full-context LL, the default.
    #[default]
    Ll,
    /// Full-context LL that also reports every ambiguity it sees.
    LlExactAmbigDetection,
}

impl PredictionMode {
    /// Parses the mode argument of the harness.
    ///
    /// Matching is case-insensitive; `sll` and `ll` select those modes and any other value
    /// selects exact ambiguity detection.
    pub fn from_arg(arg: &str) -> Self {
        match arg.to_lowercase().as_str() {
            "sll" => PredictionMode::Sll,
            "ll" => PredictionMode::Ll,
            _ => PredictionMode::LlExactAmbigDetection,
        }
    }
}

impl std::fmt::Display for PredictionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PredictionMode::Sll => "sll",
            PredictionMode::Ll => "ll",
            PredictionMode::LlExactAmbigDetection => "ll_exact_ambig_detection",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mode_arguments() {
        assert_eq!(PredictionMode::from_arg("sll"), PredictionMode::Sll);
        assert_eq!(PredictionMode::from_arg("SLL"), PredictionMode::Sll);
        assert_eq!(PredictionMode::from_arg("Ll"), PredictionMode::Ll);
        assert_eq!(
            PredictionMode::from_arg("ll_exact_ambig_detection"),
            PredictionMode::LlExactAmbigDetection
        );
        assert_eq!(
            PredictionMode::from_arg(""),
            PredictionMode::LlExactAmbigDetection
        );
        assert_eq!(PredictionMode::default(), PredictionMode::Ll);
    }

    #[test]
    fn display_round_trips() {
        for mode in [
            PredictionMode::Sll,
            PredictionMode::Ll,
            PredictionMode::LlExactAmbigDetection,
        ] {
            assert_eq!(PredictionMode::from_arg(&mode.to_string()), mode);
        }
    }
}
