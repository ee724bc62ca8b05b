//! Photo repository port definition.

use futures_util::stream::BoxStream;

use crate::domain::entities::Photo;
use crate::domain::resource::Resource;

/// Lazy sequence of emissions for one page request.
pub type PhotoStream = BoxStream<'static, Resource<Vec<Photo>>>;

/// Port for paginated photo retrieval with offline fallback.
#[cfg_attr(test, mockall::automock)]
pub trait PhotoRepository: Send + Sync {
    /// Returns the emissions for `page`. Nothing happens until the stream is polled.
    ///
    /// The stream yields `Loading`, then one terminal `Success`, or an `Error` optionally
    /// followed by one cache fallback `Success`/`Error`.
    fn get_photos(&self, page: u32, per_page: u32) -> PhotoStream;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;

    use futures_util::{StreamExt, stream};
    use parking_lot::Mutex;
    use tokio::sync::watch;

    /// Repository double that replays scripted emissions per page.
    ///
    /// Terminal emissions can be held back with [`ScriptedPhotoRepository::hold`] to keep a
    /// request in flight.
    pub struct ScriptedPhotoRepository {
        scripts: Mutex<HashMap<u32, Vec<Resource<Vec<Photo>>>>>,
        calls: Mutex<Vec<(u32, u32)>>,
        gate: watch::Sender<bool>,
    }

    impl ScriptedPhotoRepository {
        /// Creates a repository whose unscripted pages succeed with no photos.
        pub fn new() -> Self {
            let (gate, _) = watch::channel(true);
            Self {
                scripts: Mutex::new(HashMap::new()),
                calls: Mutex::new(Vec::new()),
                gate,
            }
        }

        /// Scripts `page` to emit `Loading` followed by `terminal`.
        #[must_use]
        pub fn with_page(self, page: u32, terminal: Vec<Resource<Vec<Photo>>>) -> Self {
            self.script(page, terminal);
            self
        }

        /// Scripts `page` to emit `Loading` followed by `terminal`.
        pub fn script(&self, page: u32, terminal: Vec<Resource<Vec<Photo>>>) {
            self.scripts.lock().insert(page, terminal);
        }

        /// Holds terminal emissions of every stream until [`Self::release`].
        pub fn hold(&self) {
            self.gate.send_replace(false);
        }

        /// Lets held streams continue.
        pub fn release(&self) {
            self.gate.send_replace(true);
        }

        /// Returns every `(page, per_page)` requested so far.
        pub fn calls(&self) -> Vec<(u32, u32)> {
            self.calls.lock().clone()
        }
    }

    impl Default for ScriptedPhotoRepository {
        fn default() -> Self {
            Self::new()
        }
    }

    impl PhotoRepository for ScriptedPhotoRepository {
        fn get_photos(&self, page: u32, per_page: u32) -> PhotoStream {
            self.calls.lock().push((page, per_page));
            let terminal = self
                .scripts
                .lock()
                .get(&page)
                .cloned()
                .unwrap_or_else(|| vec![Resource::success(Vec::new())]);
            let mut gate = self.gate.subscribe();

            stream::once(async { Resource::Loading })
                .chain(
                    stream::once(async move {
                        let _ = gate.wait_for(|open| *open).await;
                        stream::iter(terminal)
                    })
                    .flatten(),
                )
                .boxed()
        }
    }
}
