use shared::models::ThreadRecord;
use yewdux::Store;

/// Threads of the channel currently on screen.
#[derive(Default, Clone, PartialEq, Store)]
pub struct ThreadsState {
    pub threads: Vec<ThreadRecord>,
    pub selected: Option<ThreadRecord>,
    pub loading: bool,
    pub error: Option<String>,
    pub current_channel_id: Option<String>,
}

impl ThreadsState {
    /// A channel listing was requested.
    pub fn begin_fetch(&mut self, channel_id: &str) {
        self.loading = true;
        self.error = None;
        self.current_channel_id = Some(channel_id.to_owned());
    }

    /// The listing arrived; the first thread becomes the selection.
    pub fn finish_fetch(&mut self, threads: Vec<ThreadRecord>) {
        self.selected = threads.first().cloned();
        self.threads = threads;
        self.loading = false;
    }

    /// The listing failed; the list empties and `message` is shown.
    pub fn fail_fetch(&mut self, message: String) {
        self.error = Some(message);
        self.threads.clear();
        self.selected = None;
        self.loading = false;
    }

    /// A single thread is being refreshed.
    pub fn begin_detail(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// A refreshed thread replaces its listed copy and becomes the selection.
    pub fn finish_detail(&mut self, thread: ThreadRecord) {
        if let Some(id) = thread.id.clone() {
            self.update_in_list(&id, thread.clone());
        }
        self.select(thread);
        self.loading = false;
    }

    /// Detail lookups leave the current selection alone on failure.
    pub fn fail_detail(&mut self, message: String) {
        self.error = Some(message);
        self.loading = false;
    }

    /// Make `thread` the selection.
    pub fn select(&mut self, thread: ThreadRecord) {
        self.selected = Some(thread);
    }

    /// Select the listed thread whose key is `key`. Unknown keys are ignored.
    pub fn select_by_key(&mut self, key: &str) {
        let found = self
            .threads
            .iter()
            .find(|thread| thread.key() == Some(key))
            .cloned();
        if let Some(thread) = found {
            self.select(thread);
        }
    }

    /// Append a newly created thread to the list.
    pub fn add(&mut self, thread: ThreadRecord) {
        self.threads.push(thread);
    }

    /// Drop every listed thread matching `thread_id`, and the selection if it matches.
    pub fn remove(&mut self, thread_id: &str) {
        self.threads.retain(|thread| !thread.matches(thread_id));
        if self
            .selected
            .as_ref()
            .is_some_and(|selected| selected.matches(thread_id))
        {
            self.selected = None;
        }
    }

    /// Replace every listed thread matching `thread_id`, and the selection if it matches.
    pub fn update_in_list(&mut self, thread_id: &str, updated: ThreadRecord) {
        for thread in &mut self.threads {
            if thread.matches(thread_id) {
                *thread = updated.clone();
            }
        }
        if self
            .selected
            .as_ref()
            .is_some_and(|selected| selected.matches(thread_id))
        {
            self.selected = Some(updated);
        }
    }

    /// Forget the channel view. The thread id table is left untouched.
    pub fn clear(&mut self) {
        self.threads.clear();
        self.selected = None;
        self.current_channel_id = None;
    }

    /// Key of the selected thread, as used by the thread list.
    pub fn selected_key(&self) -> Option<String> {
        self.selected
            .as_ref()
            .and_then(ThreadRecord::key)
            .map(str::to_owned)
    }
}
