pub(crate) mod loading;
pub(crate) mod thread_list;

pub use loading::Loading;
pub use thread_list::ThreadList;
