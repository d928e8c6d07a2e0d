use window::{Event, Window};

mod logger;
mod runner;

pub use runner::run;

pub struct AppContext<'a> {
    pub window: &'a mut dyn Window,
    pub gl_api: &'a mut gl::Api,
}

/// what the handler wants the run loop to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub trait AppHandler: Sized {
    fn create(ctx: AppContext) -> anyhow::Result<Self>;
    fn iterate(
        &mut self,
        ctx: AppContext,
        events: impl Iterator<Item = Event>,
    ) -> anyhow::Result<Flow>;
}
