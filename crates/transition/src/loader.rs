use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use tracing::debug;

use crate::error::LoadError;

/// Pixel dimensions of a loaded texture, used to compute its frame fit.
pub trait TextureDimensions {
    fn dimensions(&self) -> (u32, u32);
}

/// Asynchronous `load(url) -> texture` capability consumed by the controller.
pub trait TextureLoader {
    type Texture: TextureDimensions + Clone;

    fn load(&mut self, source: &str) -> PendingTexture<Self::Texture>;
}

/// Outstanding texture request.
///
/// Dropping a pending request discards its result; the worker thread finishes
/// on its own and its send into the closed channel is ignored.
pub enum PendingTexture<T> {
    Ready(Option<Result<T, LoadError>>),
    Threaded {
        source: String,
        receiver: Receiver<Result<T, LoadError>>,
    },
}

impl<T> PendingTexture<T> {
    pub fn ready(result: Result<T, LoadError>) -> Self {
        PendingTexture::Ready(Some(result))
    }

    /// Wraps a receiver fed by some other worker.
    pub fn channel(source: impl Into<String>, receiver: Receiver<Result<T, LoadError>>) -> Self {
        PendingTexture::Threaded {
            source: source.into(),
            receiver,
        }
    }

    /// Runs `job` on a dedicated worker thread.
    pub fn spawn<F>(source: impl Into<String>, job: F) -> Self
    where
        T: Send + 'static,
        F: FnOnce() -> Result<T, LoadError> + Send + 'static,
    {
        let source = source.into();
        let (sender, receiver) = mpsc::channel();
        let worker_source = source.clone();
        let spawned = thread::Builder::new()
            .name("texture-load".into())
            .spawn(move || {
                let result = job();
                if sender.send(result).is_err() {
                    debug!(
                        source = %worker_source,
                        "texture load finished after request was dropped"
                    );
                }
            });
        match spawned {
            Ok(_) => PendingTexture::Threaded { source, receiver },
            Err(err) => PendingTexture::ready(Err(LoadError::failed(source, err))),
        }
    }

    /// Returns `Ok(None)` while the load is still running. A completed request
    /// yields its result once; later polls report the worker as disconnected.
    pub fn poll(&mut self) -> Result<Option<T>, LoadError> {
        match self {
            PendingTexture::Ready(slot) => match slot.take() {
                Some(result) => result.map(Some),
                None => Err(LoadError::Disconnected("<ready>".into())),
            },
            PendingTexture::Threaded { source, receiver } => match receiver.try_recv() {
                Ok(result) => result.map(Some),
                Err(TryRecvError::Empty) => Ok(None),
                Err(TryRecvError::Disconnected) => Err(LoadError::Disconnected(source.clone())),
            },
        }
    }
}

impl<T> std::fmt::Debug for PendingTexture<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PendingTexture::Ready(slot) => f
                .debug_struct("PendingTexture::Ready")
                .field("taken", &slot.is_none())
                .finish(),
            PendingTexture::Threaded { source, .. } => f
                .debug_struct("PendingTexture::Threaded")
                .field("source", source)
                .finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn wait_for<T>(pending: &mut PendingTexture<T>) -> Result<T, LoadError> {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if let Some(value) = pending.poll()? {
                return Ok(value);
            }
            assert!(Instant::now() < deadline, "load did not finish in time");
            thread::sleep(Duration::from_millis(1));
        }
    }

    #[test]
    fn ready_result_is_delivered_once() {
        let mut pending = PendingTexture::ready(Ok(7u32));
        assert_eq!(pending.poll(), Ok(Some(7)));
        assert!(matches!(pending.poll(), Err(LoadError::Disconnected(_))));
    }

    #[test]
    fn spawned_job_delivers_through_channel() {
        let mut pending = PendingTexture::spawn("mem://a", || Ok(42u32));
        assert_eq!(wait_for(&mut pending), Ok(42));
    }

    #[test]
    fn spawned_failure_is_reported() {
        let mut pending: PendingTexture<u32> =
            PendingTexture::spawn("mem://b", || Err(LoadError::failed("mem://b", "boom")));
        let err = wait_for(&mut pending).unwrap_err();
        assert_eq!(err.source_id(), "mem://b");
    }

    #[test]
    fn dropped_sender_reports_disconnect() {
        let (sender, receiver) = mpsc::channel::<Result<u32, LoadError>>();
        drop(sender);
        let mut pending = PendingTexture::channel("mem://c", receiver);
        assert_eq!(
            pending.poll(),
            Err(LoadError::Disconnected("mem://c".into()))
        );
    }
}
