use tokio::task::JoinHandle;

#[derive(Default)]
pub struct BackgroundTasks {
    pub reloader: Option<JoinHandle<()>>,
}

impl BackgroundTasks {
    pub fn abort_all(&mut self) {
        if let Some(handle) = self.reloader.take() {
            handle.abort();
        }
    }
}
