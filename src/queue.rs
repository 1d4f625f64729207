//! Task queue and serial executor.
//!
//! Ordered, unbounded, single consumer: watchers push [`SyncTask`]s into
//! an mpsc channel, one executor task drains it. Exactly one task is ever
//! executing system-wide, across all projects. The remote session is
//! single and stateful; two concurrent operations would corrupt it or
//! trip server connection limits, so throughput is deliberately traded
//! for connection safety.

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;

use crate::event::EventSink;
use crate::logging::*;
use crate::remote::{RemoteClient, RemoteSession};
use crate::task::SyncTask;

/// Producer half of the task queue, cloned into each project watcher
pub type TaskSender = mpsc::UnboundedSender<SyncTask>;

/// Consumer half, owned by the executor
pub type TaskReceiver = mpsc::UnboundedReceiver<SyncTask>;

/// Create the task queue
pub fn task_channel() -> (TaskSender, TaskReceiver) {
	mpsc::unbounded_channel()
}

/// Control commands for a running executor
#[derive(Debug)]
pub enum ExecutorCommand {
	/// Finish the in-flight task (if any), drop everything still queued,
	/// close the remote session, exit
	Stop,
}

/// Single-consumer executor enforcing at-most-one-in-flight execution.
///
/// Tasks run in strict FIFO order. A failing task never blocks or cancels
/// the ones behind it; error isolation happens inside
/// [`RemoteSession::execute`].
pub struct SerialExecutor<C> {
	session: RemoteSession<C>,
	tasks: TaskReceiver,
	ctrl: mpsc::Receiver<ExecutorCommand>,
	events: EventSink,
}

impl<C: RemoteClient> SerialExecutor<C> {
	pub fn new(
		session: RemoteSession<C>,
		tasks: TaskReceiver,
		ctrl: mpsc::Receiver<ExecutorCommand>,
		events: EventSink,
	) -> Self {
		SerialExecutor { session, tasks, ctrl, events }
	}

	/// Run until stopped or until every task sender is gone.
	///
	/// The stop check is biased ahead of the task channel, and repeated
	/// between drained tasks, so a stop command is honored before any
	/// queued-but-not-started work.
	pub async fn run(mut self) {
		'run: loop {
			tokio::select! {
				biased;

				cmd = self.ctrl.recv() => match cmd {
					Some(ExecutorCommand::Stop) | None => break 'run,
				},

				task = self.tasks.recv() => match task {
					Some(task) => {
						self.session.execute(&task).await;
						if self.drain().await {
							break 'run;
						}
					}
					// All watchers gone
					None => break 'run,
				},
			}
		}

		self.session.close().await;
		debug!("executor stopped");
	}

	/// Work off everything already queued; returns true on stop.
	///
	/// Emits the caught-up event when the queue is found empty.
	async fn drain(&mut self) -> bool {
		loop {
			match self.ctrl.try_recv() {
				Ok(ExecutorCommand::Stop) => return true,
				Err(TryRecvError::Disconnected) => return true,
				Err(TryRecvError::Empty) => {}
			}

			match self.tasks.try_recv() {
				Ok(task) => self.session.execute(&task).await,
				Err(_) => {
					self.events.caught_up();
					return false;
				}
			}
		}
	}
}

// vim: ts=4
