//! Process-lifetime model access: one lazily built client, two fixed profiles.

use std::sync::Arc;

use agrichat_core::{GenerationError, ModelProfile, ProfileKind};
use tokio::sync::OnceCell;
use tracing::info;

use crate::{GeminiClient, TextGenerator};

/// Builds the provider client on first use.
pub type ClientFactory =
    Box<dyn Fn() -> Result<Arc<dyn TextGenerator>, GenerationError> + Send + Sync>;

/// Owns the provider client and the model profiles for the whole process.
///
/// The client is constructed at most once, on the first successful call to
/// [`ModelAccess::client`]. A failed construction is not cached, so a later
/// request retries it. Profiles are fixed at construction time.
pub struct ModelAccess {
    factory: ClientFactory,
    client: OnceCell<Arc<dyn TextGenerator>>,
    default_profile: ModelProfile,
    agriculture_profile: ModelProfile,
}

impl ModelAccess {
    /// Creates a context whose client comes from `factory`.
    pub fn new(model: &str, factory: ClientFactory) -> Self {
        Self {
            factory,
            client: OnceCell::new(),
            default_profile: ModelProfile::default_chat(model),
            agriculture_profile: ModelProfile::agriculture(model),
        }
    }

    /// Creates a context backed by [`GeminiClient`].
    pub fn gemini(api_key: impl Into<String>, api_base: impl Into<String>, model: &str) -> Self {
        let api_key = api_key.into();
        let api_base = api_base.into();
        Self::new(
            model,
            Box::new(move || {
                let client = GeminiClient::new(&api_key, &api_base)?;
                info!("Gemini client initialized");
                Ok(Arc::new(client) as Arc<dyn TextGenerator>)
            }),
        )
    }

    /// Returns the shared client, building it on first use.
    pub async fn client(&self) -> Result<Arc<dyn TextGenerator>, GenerationError> {
        self.client
            .get_or_try_init(|| async { (self.factory)() })
            .await
            .cloned()
    }

    /// Returns the profile for `kind`.
    pub fn profile(&self, kind: ProfileKind) -> &ModelProfile {
        match kind {
            ProfileKind::Default => &self.default_profile,
            ProfileKind::Agriculture => &self.agriculture_profile,
        }
    }

    /// Makes one generation call with the profile for `kind`.
    pub async fn generate(&self, kind: ProfileKind, input: &str) -> Result<String, GenerationError> {
        let client = self.client().await?;
        client.generate(self.profile(kind), input).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;

    /// Echoes the profile kind and input back.
    struct Echo;

    #[async_trait]
    impl TextGenerator for Echo {
        async fn generate(&self, profile: &ModelProfile, input: &str) -> Result<String, GenerationError> {
            Ok(format!("{}:{}", profile.kind, input))
        }
    }

    fn counting_factory(count: Arc<AtomicUsize>) -> ClientFactory {
        Box::new(move || {
            count.fetch_add(1, Ordering::SeqCst);
            Ok(Arc::new(Echo) as Arc<dyn TextGenerator>)
        })
    }

    #[tokio::test]
    async fn client_is_built_once() {
        let count = Arc::new(AtomicUsize::new(0));
        let access = ModelAccess::new("gemini-test", counting_factory(count.clone()));

        let first = access.client().await.unwrap();
        let second = access.client().await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_first_calls_build_once() {
        let count = Arc::new(AtomicUsize::new(0));
        let seen = count.clone();
        let access = Arc::new(ModelAccess::new(
            "gemini-test",
            Box::new(move || {
                seen.fetch_add(1, Ordering::SeqCst);
                // Hold the first construction open so the others pile up behind it
                std::thread::sleep(std::time::Duration::from_millis(50));
                Ok(Arc::new(Echo) as Arc<dyn TextGenerator>)
            }),
        ));

        let mut tasks = tokio::task::JoinSet::new();
        for _ in 0..8 {
            let access = access.clone();
            tasks.spawn(async move { access.client().await.map(|_| ()) });
        }
        while let Some(result) = tasks.join_next().await {
            assert!(result.unwrap().is_ok());
        }

        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn generate_uses_requested_profile() {
        let access = ModelAccess::new("gemini-test", counting_factory(Arc::new(AtomicUsize::new(0))));
        assert_eq!(access.generate(ProfileKind::Default, "hi").await.unwrap(), "default:hi");
        assert_eq!(
            access.generate(ProfileKind::Agriculture, "rice").await.unwrap(),
            "agriculture:rice"
        );
    }

    #[test]
    fn profiles_are_stable() {
        let access = ModelAccess::new("gemini-test", counting_factory(Arc::new(AtomicUsize::new(0))));
        let a = access.profile(ProfileKind::Agriculture) as *const ModelProfile;
        let b = access.profile(ProfileKind::Agriculture) as *const ModelProfile;
        assert_eq!(a, b);
        assert_eq!(access.profile(ProfileKind::Default).model, "gemini-test");
        assert!(access.profile(ProfileKind::Default).system_instruction.is_none());
    }

    #[tokio::test]
    async fn missing_key_fails_every_time_without_caching() {
        let access = ModelAccess::gemini("", "http://localhost", "gemini-test");
        for _ in 0..2 {
            let err = access.client().await.err().unwrap();
            assert!(matches!(err, GenerationError::Configuration(_)));
        }
    }

    #[tokio::test]
    async fn failed_construction_is_retried() {
        let attempts = Arc::new(Mutex::new(0usize));
        let seen = attempts.clone();
        let access = ModelAccess::new(
            "gemini-test",
            Box::new(move || {
                let mut n = seen.lock().unwrap();
                *n += 1;
                match *n {
                    1 => Err(GenerationError::Configuration("not yet".into())),
                    _ => Ok(Arc::new(Echo) as Arc<dyn TextGenerator>),
                }
            }),
        );

        assert!(access.client().await.is_err());
        assert!(access.client().await.is_ok());
        assert!(access.client().await.is_ok());
        assert_eq!(*attempts.lock().unwrap(), 2);
    }
}
