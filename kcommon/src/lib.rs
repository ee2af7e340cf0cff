//! Shared primitives for the kestrel agent loop crates.
//!
//! ```rust
//! use kcommon::{GenerationOptions, MetadataMap, SessionId};
//!
//! let session = SessionId::from("session-1");
//! let mut metadata = MetadataMap::new();
//! metadata.insert("clinic".to_string(), "st-antonius".to_string());
//!
//! let options = GenerationOptions::default()
//!     .with_temperature(0.3)
//!     .with_stop_sequence("\nFinal Answer:");
//! assert_eq!(session.as_str(), "session-1");
//! assert_eq!(options.stop.len(), 1);
//! ```

pub mod future {
    //! Shared async future aliases.
    //!
    //! ```rust
    //! use kcommon::BoxFuture;
    //!
    //! fn str_len<'a>(value: &'a str) -> BoxFuture<'a, usize> {
    //!     Box::pin(async move { value.len() })
    //! }
    //!
    //! let _future = str_len("hello");
    //! ```

    use std::future::Future;
    use std::pin::Pin;

    pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
}

pub mod context {
    //! Metadata map and the session identifier shared across crates.
    //!
    //! ```rust
    //! use kcommon::SessionId;
    //!
    //! let session = SessionId::new("session-42");
    //!
    //! assert_eq!(session.to_string(), "session-42");
    //! assert_eq!(session.as_str(), "session-42");
    //! ```

    use std::collections::HashMap;
    use std::fmt::{Display, Formatter};

    pub type MetadataMap = HashMap<String, String>;

    macro_rules! string_id {
        ($name:ident) => {
            #[derive(Debug, Clone, PartialEq, Eq, Hash)]
            pub struct $name(String);

            impl $name {
                pub fn new(value: impl Into<String>) -> Self {
                    Self(value.into())
                }

                pub fn as_str(&self) -> &str {
                    self.0.as_str()
                }
            }

            impl Display for $name {
                fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                    f.write_str(&self.0)
                }
            }

            impl From<String> for $name {
                fn from(value: String) -> Self {
                    Self(value)
                }
            }

            impl From<&str> for $name {
                fn from(value: &str) -> Self {
                    Self(value.to_string())
                }
            }
        };
    }

    string_id!(SessionId);
}

pub mod model {
    //! Generation settings forwarded to the completion service.
    //!
    //! ```rust
    //! use kcommon::GenerationOptions;
    //!
    //! let options = GenerationOptions::default()
    //!     .with_temperature(0.2)
    //!     .with_max_tokens(128);
    //!
    //! assert_eq!(options.temperature, Some(0.2));
    //! assert_eq!(options.max_tokens, Some(128));
    //! assert!(options.stop.is_empty());
    //! ```

    #[derive(Debug, Clone, PartialEq, Default)]
    pub struct GenerationOptions {
        pub temperature: Option<f32>,
        pub max_tokens: Option<u32>,
        pub stop: Vec<String>,
    }

    impl GenerationOptions {
        pub fn with_temperature(mut self, temperature: f32) -> Self {
            self.temperature = Some(temperature);
            self
        }

        pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
            self.max_tokens = Some(max_tokens);
            self
        }

        pub fn with_stop_sequence(mut self, stop: impl Into<String>) -> Self {
            self.stop.push(stop.into());
            self
        }
    }
}

pub mod registry {
    //! Generic name-keyed map used by the tool registry.
    //!
    //! ```rust
    //! use kcommon::Registry;
    //!
    //! let mut registry = Registry::new();
    //! assert!(registry.try_insert("alpha".to_string(), 1_u32).is_ok());
    //! assert_eq!(registry.try_insert("alpha".to_string(), 2_u32), Err(2));
    //! assert_eq!(registry.get("alpha"), Some(&1));
    //! ```

    use std::borrow::Borrow;
    use std::collections::BTreeMap;

    /// Ordered by key so iteration (and anything rendered from it) is stable.
    #[derive(Debug, Clone)]
    pub struct Registry<K, V> {
        items: BTreeMap<K, V>,
    }

    impl<K, V> Default for Registry<K, V>
    where
        K: Ord,
    {
        fn default() -> Self {
            Self {
                items: BTreeMap::new(),
            }
        }
    }

    impl<K, V> Registry<K, V>
    where
        K: Ord,
    {
        pub fn new() -> Self {
            Self::default()
        }

        /// Inserts `value` unless `key` is taken, handing the value back on conflict.
        pub fn try_insert(&mut self, key: K, value: V) -> Result<(), V> {
            if self.items.contains_key(&key) {
                return Err(value);
            }

            self.items.insert(key, value);
            Ok(())
        }

        pub fn get<Q>(&self, key: &Q) -> Option<&V>
        where
            K: Borrow<Q>,
            Q: Ord + ?Sized,
        {
            self.items.get(key)
        }

        pub fn contains_key<Q>(&self, key: &Q) -> bool
        where
            K: Borrow<Q>,
            Q: Ord + ?Sized,
        {
            self.items.contains_key(key)
        }

        pub fn keys(&self) -> impl Iterator<Item = &K> {
            self.items.keys()
        }

        pub fn values(&self) -> impl Iterator<Item = &V> {
            self.items.values()
        }

        pub fn len(&self) -> usize {
            self.items.len()
        }

        pub fn is_empty(&self) -> bool {
            self.items.is_empty()
        }
    }
}

pub mod deadline {
    //! Optional wall-clock limits for a single awaited operation.
    //!
    //! ```rust
    //! use std::time::Duration;
    //!
    //! use kcommon::{DeadlineExceeded, with_deadline};
    //!
    //! let _bounded = with_deadline(async { 7 }, Some(Duration::from_secs(1)));
    //! let err = DeadlineExceeded { limit: Duration::from_millis(250) };
    //! assert_eq!(err.to_string(), "timed out after 250ms");
    //! ```

    use std::error::Error;
    use std::fmt::{Display, Formatter};
    use std::future::Future;
    use std::pin::pin;
    use std::time::Duration;

    use futures_timer::Delay;
    use futures_util::future::{Either, select};

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct DeadlineExceeded {
        pub limit: Duration,
    }

    impl Display for DeadlineExceeded {
        fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
            write!(f, "timed out after {}ms", self.limit.as_millis())
        }
    }

    impl Error for DeadlineExceeded {}

    /// Awaits `future`, giving up once `limit` elapses. `None` waits forever.
    pub async fn with_deadline<F>(
        future: F,
        limit: Option<Duration>,
    ) -> Result<F::Output, DeadlineExceeded>
    where
        F: Future,
    {
        let Some(limit) = limit else {
            return Ok(future.await);
        };

        let future = pin!(future);
        let timer = pin!(Delay::new(limit));
        match select(future, timer).await {
            Either::Left((output, _)) => Ok(output),
            Either::Right(((), _)) => Err(DeadlineExceeded { limit }),
        }
    }
}

pub use context::{MetadataMap, SessionId};
pub use deadline::{DeadlineExceeded, with_deadline};
pub use future::BoxFuture;
pub use model::GenerationOptions;
pub use registry::Registry;
