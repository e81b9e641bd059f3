pub mod threads_state;
