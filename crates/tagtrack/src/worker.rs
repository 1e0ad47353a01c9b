//! Dedicated detection worker.
//!
//! Marker detection can take tens of milliseconds of pure CPU, so it
//! never runs on the thread serving the pose query. A single named
//! worker thread owns the boxed detector and pulls jobs off a channel,
//! which also serializes access for detectors that are not reentrant.

use std::thread;
use std::time::Duration;

use crossbeam_channel::{bounded, unbounded, RecvTimeoutError, Sender};
use tagtrack_core::{CameraIntrinsics, DetectedMarker, GrayImage};

use crate::detector::{DetectError, MarkerDetector};
use crate::error::TrackerError;

struct Job {
    image: GrayImage,
    intrinsics: CameraIntrinsics,
    marker_width_m: f64,
    reply: Sender<Result<Vec<DetectedMarker>, DetectError>>,
}

/// Handle to the detection thread. Dropping it disconnects the job
/// channel and the thread exits after finishing the job in flight.
pub struct DetectionWorker {
    jobs: Sender<Job>,
}

impl DetectionWorker {
    /// Spawn the worker thread around a detector.
    pub fn spawn(detector: Box<dyn MarkerDetector>) -> Self {
        let (jobs, queue) = unbounded::<Job>();
        thread::Builder::new()
            .name("tag-detect".into())
            .spawn(move || {
                for job in queue.iter() {
                    let result =
                        detector.detect(&job.image, &job.intrinsics, job.marker_width_m);
                    // The caller may already have timed out and dropped
                    // the receiver; that is not the worker's problem.
                    let _ = job.reply.send(result);
                }
                log::debug!("detection worker shutting down");
            })
            .expect("failed to spawn detection worker thread");
        Self { jobs }
    }

    /// Run one detection on the worker, waiting at most `remaining`.
    ///
    /// On timeout the job's eventual result is discarded along with its
    /// reply channel; nothing partial is ever returned.
    pub fn detect(
        &self,
        image: GrayImage,
        intrinsics: CameraIntrinsics,
        marker_width_m: f64,
        remaining: Option<Duration>,
    ) -> Result<Vec<DetectedMarker>, TrackerError> {
        let (reply, result) = bounded(1);
        self.jobs
            .send(Job {
                image,
                intrinsics,
                marker_width_m,
                reply,
            })
            .map_err(|_| TrackerError::WorkerExited)?;

        let outcome = match remaining {
            Some(timeout) => result.recv_timeout(timeout).map_err(|err| match err {
                RecvTimeoutError::Timeout => TrackerError::Timeout,
                RecvTimeoutError::Disconnected => TrackerError::WorkerExited,
            })?,
            None => result.recv().map_err(|_| TrackerError::WorkerExited)?,
        };
        Ok(outcome?)
    }
}
