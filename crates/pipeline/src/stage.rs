use std::fmt;

/// Position of a request in the try-on state machine.
///
/// Stages run in declaration order, each exactly once. Any stage can end
/// the request in `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Resolving,
    Sniffing,
    Negotiating,
    Composing,
    Generating,
    Extracting,
    Persisting,
    Completed,
    Failed,
}

impl PipelineStage {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Resolving => "resolving",
            Self::Sniffing => "sniffing",
            Self::Negotiating => "negotiating",
            Self::Composing => "composing",
            Self::Generating => "generating",
            Self::Extracting => "extracting",
            Self::Persisting => "persisting",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    /// The stage after this one on the success path.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Resolving => Some(Self::Sniffing),
            Self::Sniffing => Some(Self::Negotiating),
            Self::Negotiating => Some(Self::Composing),
            Self::Composing => Some(Self::Generating),
            Self::Generating => Some(Self::Extracting),
            Self::Extracting => Some(Self::Persisting),
            Self::Persisting => Some(Self::Completed),
            Self::Completed | Self::Failed => None,
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_path_visits_every_stage_once() {
        let mut stage = PipelineStage::Resolving;
        let mut visited = vec![stage];
        while let Some(next) = stage.next() {
            visited.push(next);
            stage = next;
        }
        assert_eq!(
            visited,
            vec![
                PipelineStage::Resolving,
                PipelineStage::Sniffing,
                PipelineStage::Negotiating,
                PipelineStage::Composing,
                PipelineStage::Generating,
                PipelineStage::Extracting,
                PipelineStage::Persisting,
                PipelineStage::Completed,
            ]
        );
        assert_eq!(stage, PipelineStage::Completed);
    }

    #[test]
    fn failed_has_no_successor() {
        assert_eq!(PipelineStage::Failed.next(), None);
        assert_eq!(PipelineStage::Completed.next(), None);
        assert!(PipelineStage::Generating.next().is_some());
    }
}
