//! Background loading on a named worker thread.
//!
//! The worker runs the same two-phase pipeline as [`crate::load`] and sends
//! every progress event over a channel. The caller polls or iterates the
//! receiver and joins the worker with [`LoadTask::wait`].

use std::any::Any;
use std::path::Path;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{unbounded, Receiver, Sender};
use objmesh_core::{LoadOptions, LoadProgress, ObjError, ObjResult, ProgressObserver};
use tracing::{error, warn};

use crate::handle::{LoadState, ObjHandle};
use crate::obj_reader::ObjReader;

/// Forwards progress events to a channel. Events sent after the receiver
/// is gone are dropped.
struct ChannelProgress(Sender<LoadProgress>);

impl ProgressObserver for ChannelProgress {
    fn report(&mut self, progress: LoadProgress) {
        let _ = self.0.send(progress);
    }
}

enum Worker {
    Running(JoinHandle<ObjResult<ObjHandle>>),
    SpawnFailed(ObjError),
}

/// A load running on a background thread.
pub struct LoadTask {
    progress: Receiver<LoadProgress>,
    worker: Worker,
}

impl LoadTask {
    /// Progress events in emission order. Iteration ends once the worker
    /// has finished and every event has been received.
    pub fn progress(&self) -> &Receiver<LoadProgress> {
        &self.progress
    }

    pub fn is_finished(&self) -> bool {
        match &self.worker {
            Worker::Running(worker) => worker.is_finished(),
            Worker::SpawnFailed(_) => true,
        }
    }

    /// Block until the worker finishes and take back the populated handle.
    pub fn wait(self) -> ObjResult<ObjHandle> {
        match self.worker {
            Worker::Running(worker) => worker
                .join()
                .map_err(|payload| ObjError::WorkerPanicked(panic_message(payload)))?,
            Worker::SpawnFailed(err) => Err(err),
        }
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

/// Start loading `path` into `handle` on a worker thread.
///
/// A handle that is not [`LoadState::NotStarted`] or a missing file hands
/// the untouched handle back as `Err`. Otherwise the handle moves onto the
/// worker and comes back through [`LoadTask::wait`].
#[tracing::instrument(skip(handle, path, options), fields(path = %path.as_ref().display()))]
pub fn load_async<P: AsRef<Path>>(
    handle: ObjHandle,
    path: P,
    options: LoadOptions,
) -> Result<LoadTask, ObjHandle> {
    if handle.state() != LoadState::NotStarted {
        warn!(state = %handle.state(), "handle already used, not starting background load");
        return Err(handle);
    }
    let reader = match ObjReader::open(path.as_ref()) {
        Ok(reader) => reader.with_options(options),
        Err(err) => {
            warn!(%err, "not starting background load");
            return Err(handle);
        }
    };

    let (sender, progress) = unbounded();
    let worker_name = reader.options().worker_name().to_string();
    let spawned = thread::Builder::new()
        .name(worker_name)
        .spawn(move || -> ObjResult<ObjHandle> {
            let mut handle = handle;
            let mut observer = ChannelProgress(sender);
            reader.read_into(&mut handle, &mut observer)?;
            Ok(handle)
        });

    let worker = match spawned {
        Ok(worker) => Worker::Running(worker),
        Err(err) => {
            error!(%err, "failed to spawn loader thread");
            Worker::SpawnFailed(err.into())
        }
    };
    Ok(LoadTask { progress, worker })
}
