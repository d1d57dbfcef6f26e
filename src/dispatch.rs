use std::fmt;
use std::thread::{self, ThreadId};

use tracing::trace;
use winit::event_loop::EventLoopProxy;

/// Unit of work marshalled onto the UI thread.
///
/// Hosts embed tasks in their event-loop user event type and call
/// [`run`](Self::run) when one arrives.
pub struct MainThreadTask(Box<dyn FnOnce() + Send + 'static>);

impl MainThreadTask {
    pub fn new(action: impl FnOnce() + Send + 'static) -> Self {
        Self(Box::new(action))
    }

    /// Execute the wrapped action. Call from the UI thread.
    pub fn run(self) {
        (self.0)();
    }
}

impl fmt::Debug for MainThreadTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("MainThreadTask")
    }
}

/// Marshals actions onto the host's UI thread.
///
/// When the caller is already on the UI thread the task runs synchronously,
/// right away. Otherwise it is queued for the UI thread, in FIFO order
/// relative to other queued tasks.
pub trait MainThreadDispatcher: Send + Sync {
    fn run_on_main(&self, task: MainThreadTask);
}

/// Dispatcher backed by a winit event loop.
///
/// `T` is the host's user event type; queued tasks reach the loop as
/// `T::from(task)` and the host's `user_event` handler is expected to run
/// them. Construct this on the event-loop thread: winit has no "am I on the
/// loop thread" query, so the constructing thread is recorded and used for
/// the run-inline fast path.
pub struct EventLoopDispatcher<T: 'static> {
    proxy: EventLoopProxy<T>,
    ui_thread: ThreadId,
}

impl<T> EventLoopDispatcher<T>
where
    T: From<MainThreadTask> + Send + 'static,
{
    pub fn new(proxy: EventLoopProxy<T>) -> Self {
        Self {
            proxy,
            ui_thread: thread::current().id(),
        }
    }
}

impl<T> MainThreadDispatcher for EventLoopDispatcher<T>
where
    T: From<MainThreadTask> + Send + 'static,
{
    fn run_on_main(&self, task: MainThreadTask) {
        if thread::current().id() == self.ui_thread {
            task.run();
        } else {
            trace!(target: "kontomatik", "queueing task for the UI thread");
            // Nothing left to deliver to once the event loop is gone.
            let _ = self.proxy.send_event(T::from(task));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn task_runs_its_action_once() {
        let count = Arc::new(AtomicUsize::new(0));
        let counted = count.clone();
        let task = MainThreadTask::new(move || {
            counted.fetch_add(1, Ordering::SeqCst);
        });
        task.run();
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn task_debug_is_opaque() {
        let task = MainThreadTask::new(|| {});
        assert_eq!(format!("{task:?}"), "MainThreadTask");
    }
}
