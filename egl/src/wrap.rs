use std::ffi::{c_ulong, c_void};
use std::ptr::null;
use std::{array, error, fmt, ops};

use crate::libegl::*;
use crate::libwayland_egl;

// NOTE: the idea here is that Connection will hand out handles to resources
// that it creates that need cleanup/deinitialization and you'll operate on
// those handles; and Connection will be responsible for performing cleanup.

/// the error code reported by eglGetError for the most recent failure.
#[derive(Debug)]
pub struct Error(pub EGLint);

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "egl error {:#x}", self.0)
    }
}

// ----
// attribs

/// fixed-capacity EGLint attribute list. always NONE-terminated.
pub struct AttribList {
    // 64 seems enough?
    attrs: [EGLint; 64],
    len: usize,
}

impl Default for AttribList {
    fn default() -> Self {
        Self {
            attrs: [NONE as EGLint; 64],
            len: 0,
        }
    }
}

impl AttribList {
    pub fn push(&mut self, attr: EGLenum, value: EGLint) -> &mut Self {
        assert!(self.len + 2 < self.attrs.len(), "exhausted attrib capacity");
        self.attrs[self.len] = attr as EGLint;
        self.attrs[self.len + 1] = value;
        self.len += 2;
        self
    }

    /// the returned slice includes the NONE terminator.
    pub fn as_slice(&self) -> &[EGLint] {
        &self.attrs[..self.len + 1]
    }
}

#[test]
fn test_attrib_list() {
    let mut attrs = AttribList::default();
    assert_eq!(attrs.as_slice(), &[NONE as EGLint]);

    attrs.push(RED_SIZE, 8).push(GREEN_SIZE, 8);
    assert_eq!(
        attrs.as_slice(),
        &[
            RED_SIZE as EGLint,
            8,
            GREEN_SIZE as EGLint,
            8,
            NONE as EGLint,
        ],
    );
}

// ----
// display

pub enum Display {
    /// eglGetPlatformDisplay
    Khr(EGLDisplay),
    /// eglGetPlatformDisplayEXT
    /// - https://registry.khronos.org/EGL/extensions/EXT/EGL_EXT_platform_base.txt
    Ext(EGLDisplay),
    /// eglGetDisplay
    /// > the set of platforms to which display_id is permitted to belong, as well as the actual
    /// type of display_id, are implementation-specific.
    /// - https://registry.khronos.org/EGL/sdk/docs/man/html/eglGetDisplay.xhtml
    Old(EGLDisplay),
}

impl ops::Deref for Display {
    type Target = EGLDisplay;

    fn deref(&self) -> &Self::Target {
        let (Self::Khr(dpy) | Self::Ext(dpy) | Self::Old(dpy)) = self;
        dpy
    }
}

impl Display {
    fn get_platform_display(
        api: &Api,
        platform: EGLenum,
        native_display: *mut c_void,
    ) -> Option<EGLDisplay> {
        let get_platform_display = api.GetPlatformDisplay?;
        let ret = unsafe { get_platform_display(platform, native_display, null()) };
        if ret == NO_DISPLAY { None } else { Some(ret) }
    }

    fn get_platform_display_ext(
        api: &Api,
        platform: EGLenum,
        native_display: *mut c_void,
    ) -> Option<EGLDisplay> {
        let get_platform_display_ext = api.GetPlatformDisplayEXT?;
        let ret = unsafe { get_platform_display_ext(platform, native_display, null()) };
        if ret == NO_DISPLAY { None } else { Some(ret) }
    }

    fn get_display(api: &Api, native_display: *mut c_void) -> Option<EGLDisplay> {
        let ret = unsafe { (api.GetDisplay)(native_display) };
        if ret == NO_DISPLAY { None } else { Some(ret) }
    }

    fn from_platform(api: &Api, khr: EGLenum, ext: EGLenum, native: *mut c_void) -> Option<Self> {
        Self::get_platform_display(api, khr, native)
            .map(Self::Khr)
            .or_else(|| Self::get_platform_display_ext(api, ext, native).map(Self::Ext))
            .or_else(|| Self::get_display(api, native).map(Self::Old))
    }

    fn from_wayland_display(api: &Api, wl_display: *mut c_void) -> Option<Self> {
        Self::from_platform(api, PLATFORM_WAYLAND_KHR, PLATFORM_WAYLAND_EXT, wl_display)
    }

    fn from_x11_display(api: &Api, x11_display: *mut c_void) -> Option<Self> {
        Self::from_platform(api, PLATFORM_X11_KHR, PLATFORM_X11_EXT, x11_display)
    }
}

// ----
// context

#[derive(Debug)]
pub enum CreateContextError {
    CouldNotBindApi(EGLint),
    CouldNotCreateContext(EGLint),
}

impl error::Error for CreateContextError {}

impl fmt::Display for CreateContextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CouldNotBindApi(code) => write!(f, "could not bind api: {code:#x}"),
            Self::CouldNotCreateContext(code) => write!(f, "could not create context: {code:#x}"),
        }
    }
}

pub struct Context {
    index: u8,
    pub context: EGLContext,
    pub config: EGLConfig,
}

// ----
// surface

// NOTE: wsi stands for window system integration; it is somewhat modelled after
// https://registry.khronos.org/vulkan/specs/latest/html/vkspec.html#wsi

#[derive(Debug)]
pub enum CreateWaylandWsiError {
    CouldNotLoadWaylandEgl(dynlib::Error),
    CouldNotCreateWlEglWindow,
}

impl error::Error for CreateWaylandWsiError {}

impl fmt::Display for CreateWaylandWsiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CouldNotLoadWaylandEgl(err) => write!(f, "could not load wayland-egl: {err}"),
            Self::CouldNotCreateWlEglWindow => {
                write!(f, "could not create wl egl window, make sure params are correct")
            }
        }
    }
}

struct WaylandWsi {
    api: libwayland_egl::Lib,
    wl_egl_window: *mut libwayland_egl::wl_egl_window,
}

impl WaylandWsi {
    fn new(wl_surface: *mut c_void, width: u32, height: u32) -> Result<Self, CreateWaylandWsiError> {
        let api = libwayland_egl::Lib::load().map_err(CreateWaylandWsiError::CouldNotLoadWaylandEgl)?;

        let wl_egl_window =
            unsafe { (api.wl_egl_window_create)(wl_surface, width as _, height as _) };
        if wl_egl_window.is_null() {
            return Err(CreateWaylandWsiError::CouldNotCreateWlEglWindow);
        }

        Ok(Self { api, wl_egl_window })
    }
}

impl Drop for WaylandWsi {
    fn drop(&mut self) {
        unsafe { (self.api.wl_egl_window_destroy)(self.wl_egl_window) };
    }
}

struct X11Wsi {
    window: c_ulong,
}

enum Wsi {
    Wayland(WaylandWsi),
    X11(X11Wsi),
}

impl Wsi {
    /// native window argument for the eglCreatePlatformWindowSurface* entry
    /// points. for x11 that is a pointer to the XID, not the XID itself.
    fn as_platform_native_window(&mut self) -> *mut c_void {
        match self {
            Self::Wayland(wayland) => wayland.wl_egl_window.cast(),
            Self::X11(x11) => (&raw mut x11.window).cast(),
        }
    }

    /// native window argument for legacy eglCreateWindowSurface, where x11
    /// passes the XID by value.
    fn as_legacy_native_window(&self) -> EGLNativeWindowType {
        match self {
            Self::Wayland(wayland) => wayland.wl_egl_window.cast(),
            Self::X11(x11) => x11.window as usize as EGLNativeWindowType,
        }
    }

    fn resize(&self, width: u32, height: u32) {
        match self {
            Self::Wayland(wayland) => unsafe {
                (wayland.api.wl_egl_window_resize)(
                    wayland.wl_egl_window,
                    width as _,
                    height as _,
                    0,
                    0,
                )
            },
            // NOTE: x11 window surfaces track the window size on their own.
            Self::X11(_) => {}
        }
    }
}

#[derive(Debug)]
pub enum CreateSurfaceError {
    CouldNotCreateWaylandWsi(CreateWaylandWsiError),
    CouldNotCreateSurface(EGLint),
}

impl error::Error for CreateSurfaceError {}

impl fmt::Display for CreateSurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CouldNotCreateWaylandWsi(err) => write!(f, "could not create wayland wsi: {err}"),
            Self::CouldNotCreateSurface(code) => write!(f, "could not create surface: {code:#x}"),
        }
    }
}

pub struct Surface {
    index: u8,
    wsi: Wsi,
    pub surface: EGLSurface,
    pub config: EGLConfig,
}

impl Surface {
    pub fn resize(&self, width: u32, height: u32) {
        self.wsi.resize(width, height);
    }
}

// ----
// connection

#[derive(Debug)]
pub enum CreateConnectionError {
    CouldNotLoadEgl(dynlib::Error),
    CouldNotGetDisplay,
    CouldNotInitializeDisplay(EGLint),
}

impl error::Error for CreateConnectionError {}

impl fmt::Display for CreateConnectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CouldNotLoadEgl(err) => write!(f, "could not load egl: {err}"),
            Self::CouldNotGetDisplay => write!(f, "could not get display"),
            Self::CouldNotInitializeDisplay(code) => {
                write!(f, "could not initialize display: {code:#x}")
            }
        }
    }
}

pub struct Connection {
    pub api: Api,
    pub display: Display,

    // NOTE: would you want more then 16? 16 is prob too excessive?
    contexts: [Option<EGLContext>; 16],
    surfaces: [Option<EGLSurface>; 16],
}

impl Drop for Connection {
    fn drop(&mut self) {
        for maybe_surface in self.surfaces.iter_mut() {
            if let Some(surface) = maybe_surface.take() {
                unsafe { (self.api.DestroySurface)(*self.display, surface) };
            }
        }

        for maybe_context in self.contexts.iter_mut() {
            if let Some(context) = maybe_context.take() {
                unsafe { (self.api.DestroyContext)(*self.display, context) };
            }
        }

        unsafe { (self.api.Terminate)(*self.display) };
    }
}

impl Connection {
    pub fn unwrap_err(&self) -> Error {
        Error(unsafe { (self.api.GetError)() })
    }

    /// pass None for both to release the current context.
    pub fn make_current(
        &self,
        surface: Option<&Surface>,
        context: Option<&Context>,
    ) -> Result<(), Error> {
        let surface = surface.map_or(NO_SURFACE, |s| s.surface);
        let context = context.map_or(NO_CONTEXT, |c| c.context);
        let ok = unsafe { (self.api.MakeCurrent)(*self.display, surface, surface, context) };
        if ok == FALSE { Err(self.unwrap_err()) } else { Ok(()) }
    }

    pub fn swap_buffers(&self, surface: &Surface) -> Result<(), Error> {
        let ok = unsafe { (self.api.SwapBuffers)(*self.display, surface.surface) };
        if ok == FALSE { Err(self.unwrap_err()) } else { Ok(()) }
    }

    fn from_display(display_result: Option<Display>, api: Api) -> Result<Self, CreateConnectionError> {
        let display = display_result.ok_or(CreateConnectionError::CouldNotGetDisplay)?;

        let mut version = (0, 0);
        if unsafe { (api.Initialize)(*display, &mut version.0, &mut version.1) } == FALSE {
            let code = unsafe { (api.GetError)() };
            return Err(CreateConnectionError::CouldNotInitializeDisplay(code));
        }
        log::info!("initialized egl {}.{}", version.0, version.1);

        Ok(Self {
            api,
            display,
            contexts: array::from_fn(|_| None),
            surfaces: array::from_fn(|_| None),
        })
    }

    pub fn from_wayland_display(wl_display: *mut c_void) -> Result<Self, CreateConnectionError> {
        let api = Api::load().map_err(CreateConnectionError::CouldNotLoadEgl)?;
        let display = Display::from_wayland_display(&api, wl_display);
        Self::from_display(display, api)
    }

    pub fn from_x11_display(x11_display: *mut c_void) -> Result<Self, CreateConnectionError> {
        let api = Api::load().map_err(CreateConnectionError::CouldNotLoadEgl)?;
        let display = Display::from_x11_display(&api, x11_display);
        Self::from_display(display, api)
    }

    /// NOTE: i don't care how you create your EGLConfig. EGLConfig does not need clean up.
    pub fn create_context(
        &mut self,
        api: EGLenum,
        config: EGLConfig,
        share_context: Option<&Context>,
        attribs: Option<&[EGLint]>,
    ) -> Result<Context, CreateContextError> {
        attribs.inspect(|attribs| assert!(attribs.contains(&(NONE as EGLint))));

        if unsafe { (self.api.BindAPI)(api) } == FALSE {
            let code = unsafe { (self.api.GetError)() };
            return Err(CreateContextError::CouldNotBindApi(code));
        }

        let context = unsafe {
            (self.api.CreateContext)(
                *self.display,
                config,
                share_context.map_or(NO_CONTEXT, |c| c.context),
                attribs.map_or(null(), |attribs| attribs.as_ptr()),
            )
        };
        if context == NO_CONTEXT {
            let code = unsafe { (self.api.GetError)() };
            return Err(CreateContextError::CouldNotCreateContext(code));
        }

        let index = self
            .contexts
            .iter()
            .position(|it| it.is_none())
            .expect("exhausted context capacity");
        self.contexts[index] = Some(context);
        Ok(Context {
            index: index as u8,
            context,
            config,
        })
    }

    /// panics if handle is invalid.
    pub fn destroy_context(&mut self, c: Context) {
        let context = self.contexts[c.index as usize]
            .take()
            .expect("invalid context handle");
        unsafe { (self.api.DestroyContext)(*self.display, context) };
    }

    fn create_surface(
        &mut self,
        config: EGLConfig,
        mut wsi: Wsi,
        attribs: Option<&[EGLint]>,
    ) -> Result<Surface, CreateSurfaceError> {
        attribs.inspect(|attribs| assert!(attribs.contains(&(NONE as EGLint))));

        let attrib_ptr = attribs.map_or(null(), |attribs| attribs.as_ptr());

        let surface = match &self.display {
            &Display::Khr(dpy) => match self.api.CreatePlatformWindowSurface {
                Some(create) => unsafe {
                    // NOTE: EGLAttrib and EGLint attrib lists have identical
                    // layouts for the attributes surfaces take here (none).
                    create(dpy, config, wsi.as_platform_native_window(), attrib_ptr.cast())
                },
                None => unsafe {
                    (self.api.CreateWindowSurface)(
                        dpy,
                        config,
                        wsi.as_legacy_native_window(),
                        attrib_ptr,
                    )
                },
            },
            &Display::Ext(dpy) => match self.api.CreatePlatformWindowSurfaceEXT {
                Some(create) => unsafe {
                    create(dpy, config, wsi.as_platform_native_window(), attrib_ptr)
                },
                None => unsafe {
                    (self.api.CreateWindowSurface)(
                        dpy,
                        config,
                        wsi.as_legacy_native_window(),
                        attrib_ptr,
                    )
                },
            },
            &Display::Old(dpy) => unsafe {
                (self.api.CreateWindowSurface)(dpy, config, wsi.as_legacy_native_window(), attrib_ptr)
            },
        };
        if surface == NO_SURFACE {
            let code = unsafe { (self.api.GetError)() };
            return Err(CreateSurfaceError::CouldNotCreateSurface(code));
        }

        let index = self
            .surfaces
            .iter()
            .position(|it| it.is_none())
            .expect("exhausted surface capacity");
        self.surfaces[index] = Some(surface);
        Ok(Surface {
            index: index as u8,
            wsi,
            surface,
            config,
        })
    }

    /// NOTE: i don't care how you create your EGLConfig. EGLConfig does not need clean up.
    pub fn create_wayland_surface(
        &mut self,
        config: EGLConfig,
        wl_surface: *mut c_void,
        width: u32,
        height: u32,
        attribs: Option<&[EGLint]>,
    ) -> Result<Surface, CreateSurfaceError> {
        let wsi = Wsi::Wayland(
            WaylandWsi::new(wl_surface, width, height)
                .map_err(CreateSurfaceError::CouldNotCreateWaylandWsi)?,
        );
        self.create_surface(config, wsi, attribs)
    }

    pub fn create_x11_surface(
        &mut self,
        config: EGLConfig,
        window: c_ulong,
        attribs: Option<&[EGLint]>,
    ) -> Result<Surface, CreateSurfaceError> {
        self.create_surface(config, Wsi::X11(X11Wsi { window }), attribs)
    }

    /// panics if handle is invalid.
    pub fn destroy_surface(&mut self, s: Surface) {
        let surface = self.surfaces[s.index as usize]
            .take()
            .expect("invalid surface handle");
        unsafe { (self.api.DestroySurface)(*self.display, surface) };
    }
}
