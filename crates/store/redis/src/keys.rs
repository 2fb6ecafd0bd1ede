/// Renders the Redis keys used by the store under one prefix.
#[derive(Debug, Clone)]
pub(crate) struct KeySpace {
    prefix: String,
}

impl KeySpace {
    pub(crate) fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_owned(),
        }
    }

    pub(crate) fn upload(&self, id: &str) -> String {
        format!("{}:upload:{id}", self.prefix)
    }

    pub(crate) fn tryon(&self, id: &str) -> String {
        format!("{}:tryon:{id}", self.prefix)
    }

    pub(crate) fn feedback(&self, try_on_id: &str) -> String {
        format!("{}:tryon:{try_on_id}:feedback", self.prefix)
    }

    pub(crate) fn feedback_index(&self) -> String {
        format!("{}:feedback:index", self.prefix)
    }

    pub(crate) fn feedback_serial(&self) -> String {
        format!("{}:feedback:serial", self.prefix)
    }

    pub(crate) fn status(&self) -> String {
        format!("{}:status", self.prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_prefixed() {
        let keys = KeySpace::new("tryon");
        assert_eq!(keys.upload("u1"), "tryon:upload:u1");
        assert_eq!(keys.tryon("t1"), "tryon:tryon:t1");
        assert_eq!(keys.feedback("t1"), "tryon:tryon:t1:feedback");
        assert_eq!(keys.feedback_index(), "tryon:feedback:index");
        assert_eq!(keys.feedback_serial(), "tryon:feedback:serial");
        assert_eq!(keys.status(), "tryon:status");
    }
}
