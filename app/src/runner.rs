use std::ptr::null_mut;

use anyhow::{Context as _, anyhow};
use raw_window_handle as rwh;
use window::{Event, Window, WindowAttrs, WindowEvent};

use crate::logger::Logger;
use crate::{AppContext, AppHandler, Flow};

struct InitializedGraphicsContext {
    egl_connection: egl::wrap::Connection,
    egl_context: egl::wrap::Context,
    egl_surface: egl::wrap::Surface,
    gl_api: gl::Api,
}

enum GraphicsContext {
    Initialized(InitializedGraphicsContext),
    Uninit,
}

impl GraphicsContext {
    fn init(
        &mut self,
        display_handle: rwh::DisplayHandle,
        window_handle: rwh::WindowHandle,
        width: u32,
        height: u32,
    ) -> anyhow::Result<&mut InitializedGraphicsContext> {
        assert!(matches!(self, Self::Uninit));

        let mut egl_connection = match display_handle.as_raw() {
            rwh::RawDisplayHandle::Wayland(rdh) => {
                egl::wrap::Connection::from_wayland_display(rdh.display.as_ptr())
                    .context("could not create egl connection")?
            }
            rwh::RawDisplayHandle::Xlib(rdh) => egl::wrap::Connection::from_x11_display(
                rdh.display.map_or(null_mut(), |display| display.as_ptr()),
            )
            .context("could not create egl connection")?,
            _ => return Err(anyhow!(format!("unsupported display: {display_handle:?}"))),
        };

        let egl_config = choose_config(&egl_connection)?;

        let egl_context = {
            let mut context_attrs = egl::wrap::AttribList::default();
            context_attrs
                .push(egl::CONTEXT_MAJOR_VERSION, 3)
                .push(egl::CONTEXT_MINOR_VERSION, 3)
                .push(
                    egl::CONTEXT_OPENGL_PROFILE_MASK,
                    egl::CONTEXT_OPENGL_CORE_PROFILE_BIT,
                );
            // NOTE: don't enable debug in release builds.
            #[cfg(debug_assertions)]
            context_attrs.push(egl::CONTEXT_OPENGL_DEBUG, egl::TRUE as egl::EGLint);

            egl_connection.create_context(
                egl::OPENGL_API,
                egl_config,
                None,
                Some(context_attrs.as_slice()),
            )?
        };

        let egl_surface = match window_handle.as_raw() {
            rwh::RawWindowHandle::Wayland(rwh) => egl_connection.create_wayland_surface(
                egl_context.config,
                rwh.surface.as_ptr(),
                width,
                height,
                None,
            )?,
            rwh::RawWindowHandle::Xlib(rwh) => {
                egl_connection.create_x11_surface(egl_context.config, rwh.window, None)?
            }
            other => return Err(anyhow!("unsupported window system: {other:?}")),
        };

        egl_connection
            .make_current(Some(&egl_surface), Some(&egl_context))
            .context("could not make current")?;

        let gl_api = unsafe {
            gl::Api::load_with(|procname| (egl_connection.api.GetProcAddress)(procname))
        }
        .context("could not load gl api")?;

        let gl_version = unsafe { gl_api.get_string(gl::VERSION) }
            .context("could not get gl version string")?;
        log::info!("initialized gl {gl_version}");

        *self = Self::Initialized(InitializedGraphicsContext {
            egl_connection,
            egl_context,
            egl_surface,
            gl_api,
        });
        let Self::Initialized(init) = self else {
            unreachable!();
        };
        Ok(init)
    }
}

fn choose_config(egl_connection: &egl::wrap::Connection) -> anyhow::Result<egl::EGLConfig> {
    use egl::*;

    let mut config_attrs = wrap::AttribList::default();
    config_attrs
        .push(RED_SIZE, 8)
        .push(GREEN_SIZE, 8)
        .push(BLUE_SIZE, 8)
        // NOTE: it is important to set EGL_ALPHA_SIZE, it enables transparency
        .push(ALPHA_SIZE, 8)
        .push(SURFACE_TYPE, WINDOW_BIT)
        .push(CONFORMANT, OPENGL_BIT)
        .push(RENDERABLE_TYPE, OPENGL_BIT);

    let mut configs = [null_mut(); 64];
    let mut num_configs = 0;
    let ok = unsafe {
        (egl_connection.api.ChooseConfig)(
            *egl_connection.display,
            config_attrs.as_slice().as_ptr(),
            configs.as_mut_ptr(),
            configs.len() as EGLint,
            &mut num_configs,
        )
    };
    if ok == FALSE || num_configs == 0 {
        return Err(egl_connection.unwrap_err()).context("could not choose config");
    }
    log::debug!("got {num_configs} egl configs matching the requested attrs");

    // TODO: is the first one guaranteed to be the best one? or do configs
    // have to be probed one by one until surface creation succeeds?
    Ok(configs[0])
}

struct Context<A: AppHandler> {
    window: Box<dyn Window>,
    graphics_context: GraphicsContext,
    events: Vec<Event>,
    app_handler: Option<A>,
    close_requested: bool,
}

impl<A: AppHandler> Context<A> {
    fn new(window_attrs: WindowAttrs) -> anyhow::Result<Self> {
        let window = window::create_window(window_attrs)?;
        Ok(Self {
            window,
            graphics_context: GraphicsContext::Uninit,
            events: Vec::new(),
            app_handler: None,
            close_requested: false,
        })
    }

    fn iterate(&mut self) -> anyhow::Result<()> {
        self.window.pump_events()?;

        while let Some(event) = self.window.pop_event() {
            match event {
                Event::Window(WindowEvent::Configure { .. }) => match self.graphics_context {
                    GraphicsContext::Uninit => {
                        let (width, height) = self.window.size();
                        let igc = self.graphics_context.init(
                            self.window.display_handle()?,
                            self.window.window_handle()?,
                            width,
                            height,
                        )?;

                        self.app_handler = Some(A::create(AppContext {
                            window: self.window.as_mut(),
                            gl_api: &mut igc.gl_api,
                        })?);
                    }
                    GraphicsContext::Initialized(_) => {
                        unreachable!();
                    }
                },
                Event::Window(WindowEvent::Resized { physical_size }) => {
                    if let GraphicsContext::Initialized(ref mut igc) = self.graphics_context {
                        igc.egl_surface.resize(physical_size.0, physical_size.1);
                    }
                }
                Event::Window(WindowEvent::CloseRequested) => {
                    self.close_requested = true;
                }
                _ => {}
            }
            self.events.push(event);
        }

        let events = self.events.drain(..);

        let (
            Some(app_handler),
            GraphicsContext::Initialized(InitializedGraphicsContext {
                egl_connection,
                egl_context,
                egl_surface,
                gl_api,
            }),
        ) = (self.app_handler.as_mut(), &mut self.graphics_context)
        else {
            return Ok(());
        };

        egl_connection
            .make_current(Some(&*egl_surface), Some(&*egl_context))
            .context("could not make current")?;

        let flow = app_handler.iterate(
            AppContext {
                window: self.window.as_mut(),
                gl_api,
            },
            events,
        )?;
        if flow == Flow::Exit {
            self.close_requested = true;
        }

        egl_connection
            .swap_buffers(egl_surface)
            .context("could not swap buffers")?;

        Ok(())
    }
}

/// runs the blocking per-frame loop until the handler asks to exit or the
/// window is asked to close. initialization failures propagate out so that
/// `main` can exit nonzero.
pub fn run<A: AppHandler>(window_attrs: WindowAttrs) -> anyhow::Result<()> {
    Logger::init();

    let mut ctx = Context::<A>::new(window_attrs).context("could not create app context")?;
    while !ctx.close_requested {
        ctx.iterate()?;
    }

    Ok(())
}
