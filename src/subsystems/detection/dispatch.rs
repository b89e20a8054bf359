//! Alert dispatch
//!
//! A fired incident becomes an [`AlertJob`]. The dispatcher decides where
//! the job runs: [`InlineDispatcher`] blocks the caller for the whole modem
//! exchange, [`ThreadedDispatcher`] hands it to a worker thread over a
//! channel. Either way the outcome is written back into the shared alert
//! state machine by the [`DeliveryWorker`].

use std::sync::mpsc::{self, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crash_beacon_core::alert::{AlertStateMachine, Incident};
use crash_beacon_core::location::LocationFix;

use super::service::{AlertError, AlertService};
use crate::core::traits::{SharedState, StdState};
use crate::devices::modem::ModemChannel;

/// One alert to deliver
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlertJob {
    pub incident: Incident,
    /// Time the countdown expired (µs)
    pub fired_at_us: u64,
    /// Cached fix at fire time, if still within the staleness bound
    pub location: Option<LocationFix>,
}

/// Accepts fired incidents
pub trait AlertDispatcher {
    fn dispatch(&mut self, job: AlertJob);
}

impl<D: AlertDispatcher + ?Sized> AlertDispatcher for Box<D> {
    fn dispatch(&mut self, job: AlertJob) {
        (**self).dispatch(job)
    }
}

/// Runs jobs against an [`AlertService`] and records the outcome
pub struct DeliveryWorker<C: ModemChannel> {
    service: AlertService<C>,
    machine: Arc<StdState<AlertStateMachine>>,
}

impl<C: ModemChannel> DeliveryWorker<C> {
    pub fn new(service: AlertService<C>, machine: Arc<StdState<AlertStateMachine>>) -> Self {
        Self { service, machine }
    }

    /// Initialize the modem; failure is logged and leaves the service in
    /// fail-fast mode
    pub fn prepare(&mut self) -> bool {
        match self.service.prepare() {
            Ok(()) => true,
            Err(err) => {
                crate::log_error!("Modem initialization failed, alerts cannot be sent: {}", err);
                false
            }
        }
    }

    /// Deliver one job and record the result on its incident
    pub fn run(&mut self, job: AlertJob) -> Result<(), AlertError> {
        let result = self.service.deliver(&job);
        let id = job.incident.id;
        let recorded = self
            .machine
            .with_mut(|machine| machine.record_delivery(id, result.is_ok()));

        match &result {
            Ok(()) => crate::log_info!("Alert for incident {} delivered", id),
            Err(err) => crate::log_error!("Alert for incident {} failed: {}", id, err),
        }
        if !recorded {
            crate::log_debug!("Incident {} no longer current, outcome not recorded", id);
        }
        result
    }

    pub fn service(&self) -> &AlertService<C> {
        &self.service
    }

    pub fn service_mut(&mut self) -> &mut AlertService<C> {
        &mut self.service
    }
}

/// Delivers on the calling thread
///
/// The sampling loop stalls for the duration of the modem exchange and
/// accepts the resulting sample gap.
pub struct InlineDispatcher<C: ModemChannel> {
    worker: DeliveryWorker<C>,
}

impl<C: ModemChannel> InlineDispatcher<C> {
    /// Wrap a worker and initialize its modem
    pub fn new(mut worker: DeliveryWorker<C>) -> Self {
        worker.prepare();
        Self { worker }
    }

    pub fn worker(&self) -> &DeliveryWorker<C> {
        &self.worker
    }
}

impl<C: ModemChannel> AlertDispatcher for InlineDispatcher<C> {
    fn dispatch(&mut self, job: AlertJob) {
        let _ = self.worker.run(job);
    }
}

/// Delivers on a dedicated worker thread
///
/// Jobs are queued over an mpsc channel. Dropping the dispatcher closes
/// the channel and joins the worker after it has drained the queue.
pub struct ThreadedDispatcher {
    sender: Option<Sender<AlertJob>>,
    handle: Option<JoinHandle<()>>,
    machine: Arc<StdState<AlertStateMachine>>,
}

impl ThreadedDispatcher {
    /// Start the worker thread; modem initialization runs on it
    pub fn spawn<C>(mut worker: DeliveryWorker<C>) -> std::io::Result<Self>
    where
        C: ModemChannel + Send + 'static,
    {
        let machine = worker.machine.clone();
        let (sender, receiver) = mpsc::channel::<AlertJob>();

        let handle = thread::Builder::new()
            .name("alert-delivery".into())
            .spawn(move || {
                worker.prepare();
                for job in receiver {
                    let _ = worker.run(job);
                }
                crate::log_debug!("Alert worker exiting");
            })?;

        Ok(Self {
            sender: Some(sender),
            handle: Some(handle),
            machine,
        })
    }

    /// Close the queue and wait for outstanding jobs
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        self.sender.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                crate::log_error!("Alert worker panicked");
            }
        }
    }
}

impl AlertDispatcher for ThreadedDispatcher {
    fn dispatch(&mut self, job: AlertJob) {
        let sent = self
            .sender
            .as_ref()
            .is_some_and(|sender| sender.send(job).is_ok());
        if !sent {
            crate::log_error!("Alert worker unavailable, incident {} not sent", job.incident.id);
            self.machine
                .with_mut(|machine| machine.record_delivery(job.incident.id, false));
        }
    }
}

impl Drop for ThreadedDispatcher {
    fn drop(&mut self) {
        self.stop();
    }
}
