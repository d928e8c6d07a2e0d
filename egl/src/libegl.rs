#![allow(non_snake_case)]

use std::ffi::{CStr, c_char, c_int, c_uint, c_void};
use std::mem::transmute_copy;
use std::ptr::null_mut;

use dynlib::DynLib;

pub type EGLBoolean = c_uint;
pub type EGLint = c_int;
pub type EGLenum = c_uint;
/// intptr_t in the C headers.
pub type EGLAttrib = isize;

pub type EGLDisplay = *mut c_void;
pub type EGLConfig = *mut c_void;
pub type EGLContext = *mut c_void;
pub type EGLSurface = *mut c_void;

pub type EGLNativeDisplayType = *mut c_void;
pub type EGLNativeWindowType = *mut c_void;

pub const FALSE: EGLBoolean = 0;
pub const TRUE: EGLBoolean = 1;

pub const NO_DISPLAY: EGLDisplay = null_mut();
pub const NO_CONTEXT: EGLContext = null_mut();
pub const NO_SURFACE: EGLSurface = null_mut();

pub const SUCCESS: EGLint = 0x3000;

pub const ALPHA_SIZE: EGLenum = 0x3021;
pub const BLUE_SIZE: EGLenum = 0x3022;
pub const GREEN_SIZE: EGLenum = 0x3023;
pub const RED_SIZE: EGLenum = 0x3024;
pub const SAMPLES: EGLenum = 0x3031;
pub const SAMPLE_BUFFERS: EGLenum = 0x3032;
pub const SURFACE_TYPE: EGLenum = 0x3033;
pub const NONE: EGLenum = 0x3038;
pub const COLOR_BUFFER_TYPE: EGLenum = 0x303F;
pub const RENDERABLE_TYPE: EGLenum = 0x3040;
pub const CONFORMANT: EGLenum = 0x3042;
pub const RGB_BUFFER: EGLenum = 0x308E;
pub const VENDOR: EGLenum = 0x3053;
pub const VERSION: EGLenum = 0x3054;

pub const WINDOW_BIT: EGLint = 0x0004;
pub const OPENGL_BIT: EGLint = 0x0008;

pub const OPENGL_API: EGLenum = 0x30A2;

pub const CONTEXT_MAJOR_VERSION: EGLenum = 0x3098;
pub const CONTEXT_MINOR_VERSION: EGLenum = 0x30FB;
pub const CONTEXT_OPENGL_PROFILE_MASK: EGLenum = 0x30FD;
pub const CONTEXT_OPENGL_DEBUG: EGLenum = 0x31B0;
pub const CONTEXT_OPENGL_CORE_PROFILE_BIT: EGLint = 0x0001;

pub const PLATFORM_X11_KHR: EGLenum = 0x31D5;
pub const PLATFORM_WAYLAND_KHR: EGLenum = 0x31D8;
// NOTE: the EXT values alias the KHR ones, see
// https://registry.khronos.org/EGL/extensions/EXT/EGL_EXT_platform_x11.txt and
// https://registry.khronos.org/EGL/extensions/EXT/EGL_EXT_platform_wayland.txt
pub const PLATFORM_X11_EXT: EGLenum = 0x31D5;
pub const PLATFORM_WAYLAND_EXT: EGLenum = 0x31D8;

pub type GetProcAddressFn = unsafe extern "C" fn(procname: *const c_char) -> *mut c_void;

/// function pointer table for the subset of libEGL this workspace calls.
///
/// NOTE: some funcs (the ones that get enabled by extensions) cannot be loaded
/// with dlsym, but only with eglGetProcAddress; those live in the `Option`al
/// tail of the struct and stay `None` when the implementation does not expose
/// them.
pub struct Api {
    pub GetError: unsafe extern "C" fn() -> EGLint,

    pub GetDisplay: unsafe extern "C" fn(display_id: EGLNativeDisplayType) -> EGLDisplay,
    pub Initialize:
        unsafe extern "C" fn(dpy: EGLDisplay, major: *mut EGLint, minor: *mut EGLint) -> EGLBoolean,
    pub Terminate: unsafe extern "C" fn(dpy: EGLDisplay) -> EGLBoolean,

    pub BindAPI: unsafe extern "C" fn(api: EGLenum) -> EGLBoolean,

    pub ChooseConfig: unsafe extern "C" fn(
        dpy: EGLDisplay,
        attrib_list: *const EGLint,
        configs: *mut EGLConfig,
        config_size: EGLint,
        num_config: *mut EGLint,
    ) -> EGLBoolean,

    pub CreateContext: unsafe extern "C" fn(
        dpy: EGLDisplay,
        config: EGLConfig,
        share_context: EGLContext,
        attrib_list: *const EGLint,
    ) -> EGLContext,
    pub DestroyContext: unsafe extern "C" fn(dpy: EGLDisplay, ctx: EGLContext) -> EGLBoolean,

    pub CreateWindowSurface: unsafe extern "C" fn(
        dpy: EGLDisplay,
        config: EGLConfig,
        win: EGLNativeWindowType,
        attrib_list: *const EGLint,
    ) -> EGLSurface,
    pub DestroySurface: unsafe extern "C" fn(dpy: EGLDisplay, surface: EGLSurface) -> EGLBoolean,

    pub MakeCurrent: unsafe extern "C" fn(
        dpy: EGLDisplay,
        draw: EGLSurface,
        read: EGLSurface,
        ctx: EGLContext,
    ) -> EGLBoolean,
    pub SwapBuffers: unsafe extern "C" fn(dpy: EGLDisplay, surface: EGLSurface) -> EGLBoolean,

    pub GetProcAddress: GetProcAddressFn,

    // EGL 1.5 / EGL_EXT_platform_base
    pub GetPlatformDisplay: Option<
        unsafe extern "C" fn(
            platform: EGLenum,
            native_display: *mut c_void,
            attrib_list: *const EGLAttrib,
        ) -> EGLDisplay,
    >,
    pub GetPlatformDisplayEXT: Option<
        unsafe extern "C" fn(
            platform: EGLenum,
            native_display: *mut c_void,
            attrib_list: *const EGLint,
        ) -> EGLDisplay,
    >,
    pub CreatePlatformWindowSurface: Option<
        unsafe extern "C" fn(
            dpy: EGLDisplay,
            config: EGLConfig,
            native_window: *mut c_void,
            attrib_list: *const EGLAttrib,
        ) -> EGLSurface,
    >,
    pub CreatePlatformWindowSurfaceEXT: Option<
        unsafe extern "C" fn(
            dpy: EGLDisplay,
            config: EGLConfig,
            native_window: *mut c_void,
            attrib_list: *const EGLint,
        ) -> EGLSurface,
    >,

    _dynlib: DynLib,
}

unsafe fn lookup_optional<F: Sized>(get_proc_address: GetProcAddressFn, name: &CStr) -> Option<F> {
    let addr = unsafe { get_proc_address(name.as_ptr()) };
    if addr.is_null() {
        None
    } else {
        Some(unsafe { transmute_copy(&addr) })
    }
}

impl Api {
    pub fn load() -> Result<Self, dynlib::Error> {
        let dynlib = DynLib::load(c"libEGL.so").or_else(|_| DynLib::load(c"libEGL.so.1"))?;

        let get_proc_address = dynlib.lookup::<GetProcAddressFn>(c"eglGetProcAddress")?;

        Ok(Self {
            GetError: dynlib.lookup(c"eglGetError")?,

            GetDisplay: dynlib.lookup(c"eglGetDisplay")?,
            Initialize: dynlib.lookup(c"eglInitialize")?,
            Terminate: dynlib.lookup(c"eglTerminate")?,

            BindAPI: dynlib.lookup(c"eglBindAPI")?,

            ChooseConfig: dynlib.lookup(c"eglChooseConfig")?,

            CreateContext: dynlib.lookup(c"eglCreateContext")?,
            DestroyContext: dynlib.lookup(c"eglDestroyContext")?,

            CreateWindowSurface: dynlib.lookup(c"eglCreateWindowSurface")?,
            DestroySurface: dynlib.lookup(c"eglDestroySurface")?,

            MakeCurrent: dynlib.lookup(c"eglMakeCurrent")?,
            SwapBuffers: dynlib.lookup(c"eglSwapBuffers")?,

            GetProcAddress: get_proc_address,

            GetPlatformDisplay: unsafe {
                lookup_optional(get_proc_address, c"eglGetPlatformDisplay")
            },
            GetPlatformDisplayEXT: unsafe {
                lookup_optional(get_proc_address, c"eglGetPlatformDisplayEXT")
            },
            CreatePlatformWindowSurface: unsafe {
                lookup_optional(get_proc_address, c"eglCreatePlatformWindowSurface")
            },
            CreatePlatformWindowSurfaceEXT: unsafe {
                lookup_optional(get_proc_address, c"eglCreatePlatformWindowSurfaceEXT")
            },

            _dynlib: dynlib,
        })
    }
}
