use std::path::Path;

use gemini_client::GeminiClient;

use crate::error::GenerateError;
use crate::prompt;
use crate::publisher::{weighted_len, MAX_POST_WEIGHT};
use crate::store::NameStore;

/// Turns a prompt into raw model text.
pub trait NameGenerator {
    fn generate(&self, prompt: &str) -> Result<String, GenerateError>;
}

impl<T: NameGenerator + ?Sized> NameGenerator for &T {
    fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
        (**self).generate(prompt)
    }
}

impl NameGenerator for GeminiClient {
    fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
        Ok(GeminiClient::generate(self, prompt)?)
    }
}

/// Read history, build the prompt, ask the model, and vet the answer.
pub fn generate_name<S, G>(
    store: &S,
    generator: &G,
    template_path: &Path,
) -> Result<String, GenerateError>
where
    S: NameStore + ?Sized,
    G: NameGenerator + ?Sized,
{
    let past = store.list_all().map_err(GenerateError::History)?;
    tracing::debug!(past_names = past.len(), "building prompt");
    let prompt = prompt::build(&past, template_path)?;
    let raw = generator.generate(&prompt)?;
    accept(&raw)
}

/// Trim model output and reject what could never be posted.
pub fn accept(raw: &str) -> Result<String, GenerateError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(GenerateError::Empty);
    }
    let len = weighted_len(name);
    if len > MAX_POST_WEIGHT {
        return Err(GenerateError::TooLong {
            len,
            limit: MAX_POST_WEIGHT,
        });
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use std::cell::RefCell;
    use tempfile::TempDir;

    struct FixedStore(Vec<String>);

    impl NameStore for FixedStore {
        fn list_all(&self) -> Result<Vec<String>, StoreError> {
            Ok(self.0.clone())
        }
        fn insert(&self, _name: &str) -> Result<(), StoreError> {
            unreachable!("generation never writes")
        }
    }

    struct BrokenStore;

    impl NameStore for BrokenStore {
        fn list_all(&self) -> Result<Vec<String>, StoreError> {
            Err(StoreError::Io(std::io::Error::other("disk gone")))
        }
        fn insert(&self, _name: &str) -> Result<(), StoreError> {
            unreachable!()
        }
    }

    /// Records the prompt it was given and answers with a canned reply.
    struct Echo {
        reply: String,
        seen: RefCell<Option<String>>,
    }

    impl Echo {
        fn new(reply: &str) -> Self {
            Self {
                reply: reply.to_string(),
                seen: RefCell::new(None),
            }
        }
    }

    impl NameGenerator for Echo {
        fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
            *self.seen.borrow_mut() = Some(prompt.to_string());
            Ok(self.reply.clone())
        }
    }

    fn template(dir: &TempDir) -> std::path::PathBuf {
        let path = dir.path().join("prompt.txt");
        std::fs::write(&path, "Avoid: ").unwrap();
        path
    }

    #[test]
    fn prompt_carries_history_and_reply_is_trimmed() {
        let dir = TempDir::new().unwrap();
        let store = FixedStore(vec!["Sunset FM".into(), "Night Wave".into()]);
        let model = Echo::new("  Echo Drift\n");

        let name = generate_name(&store, &model, &template(&dir)).unwrap();

        assert_eq!(name, "Echo Drift");
        assert_eq!(
            model.seen.borrow().as_deref(),
            Some("Avoid: Sunset FM,Night Wave")
        );
    }

    #[test]
    fn store_failure_is_history_error() {
        let dir = TempDir::new().unwrap();
        let err = generate_name(&BrokenStore, &Echo::new("x"), &template(&dir)).unwrap_err();
        assert!(matches!(err, GenerateError::History(_)));
    }

    #[test]
    fn missing_template_never_reaches_model() {
        let dir = TempDir::new().unwrap();
        let model = Echo::new("x");
        let err = generate_name(&FixedStore(vec![]), &model, &dir.path().join("absent.txt"))
            .unwrap_err();
        assert!(matches!(err, GenerateError::Prompt(_)));
        assert!(model.seen.borrow().is_none());
    }

    #[test]
    fn accept_rejects_blank_output() {
        assert!(matches!(accept(""), Err(GenerateError::Empty)));
        assert!(matches!(accept(" \n\t"), Err(GenerateError::Empty)));
    }

    #[test]
    fn accept_uses_post_weight() {
        let latin = "a".repeat(MAX_POST_WEIGHT);
        assert_eq!(accept(&latin).unwrap(), latin);

        let katakana = "ラ".repeat(MAX_POST_WEIGHT / 2);
        assert_eq!(accept(&katakana).unwrap(), katakana);

        match accept(&"ラ".repeat(MAX_POST_WEIGHT / 2 + 1)) {
            Err(GenerateError::TooLong { len, limit }) => {
                assert_eq!(len, MAX_POST_WEIGHT + 2);
                assert_eq!(limit, MAX_POST_WEIGHT);
            }
            other => panic!("expected TooLong, got {other:?}"),
        }
        assert!(matches!(
            accept(&"a".repeat(MAX_POST_WEIGHT + 1)),
            Err(GenerateError::TooLong { .. })
        ));
    }
}
