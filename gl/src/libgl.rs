#![allow(non_snake_case)]

use std::error;
use std::ffi::{CStr, c_char, c_void};
use std::fmt;
use std::mem::transmute_copy;

use crate::types::*;

#[derive(Debug)]
pub struct LoadError {
    pub procname: &'static str,
}

impl error::Error for LoadError {}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_fmt(format_args!("could not load gl proc {}", self.procname))
    }
}

unsafe fn lookup<T: Sized, F>(get_proc_address: &mut F, procname: &'static CStr) -> Result<T, LoadError>
where
    F: FnMut(*const c_char) -> *mut c_void,
{
    let addr = get_proc_address(procname.as_ptr());
    if addr.is_null() {
        Err(LoadError {
            procname: procname.to_str().expect("ascii procname"),
        })
    } else {
        Ok(unsafe { transmute_copy(&addr) })
    }
}

/// function pointer table for the subset of opengl 3.3 core this workspace
/// calls.
pub struct Lib {
    pub AttachShader: unsafe extern "C" fn(program: GLuint, shader: GLuint),
    pub BindBuffer: unsafe extern "C" fn(target: GLenum, buffer: GLuint),
    pub BindVertexArray: unsafe extern "C" fn(array: GLuint),
    pub BufferData: unsafe extern "C" fn(
        target: GLenum,
        size: GLsizeiptr,
        data: *const c_void,
        usage: GLenum,
    ),
    pub Clear: unsafe extern "C" fn(mask: GLbitfield),
    pub ClearColor:
        unsafe extern "C" fn(red: GLfloat, green: GLfloat, blue: GLfloat, alpha: GLfloat),
    pub CompileShader: unsafe extern "C" fn(shader: GLuint),
    pub CreateProgram: unsafe extern "C" fn() -> GLuint,
    pub CreateShader: unsafe extern "C" fn(r#type: GLenum) -> GLuint,
    pub DeleteBuffers: unsafe extern "C" fn(n: GLsizei, buffers: *const GLuint),
    pub DeleteProgram: unsafe extern "C" fn(program: GLuint),
    pub DeleteShader: unsafe extern "C" fn(shader: GLuint),
    pub DeleteVertexArrays: unsafe extern "C" fn(n: GLsizei, arrays: *const GLuint),
    pub DetachShader: unsafe extern "C" fn(program: GLuint, shader: GLuint),
    pub DrawArrays: unsafe extern "C" fn(mode: GLenum, first: GLint, count: GLsizei),
    pub DrawBuffer: unsafe extern "C" fn(buf: GLenum),
    pub EnableVertexAttribArray: unsafe extern "C" fn(index: GLuint),
    pub GenBuffers: unsafe extern "C" fn(n: GLsizei, buffers: *mut GLuint),
    pub GenVertexArrays: unsafe extern "C" fn(n: GLsizei, arrays: *mut GLuint),
    pub GetError: unsafe extern "C" fn() -> GLenum,
    pub GetProgramInfoLog: unsafe extern "C" fn(
        program: GLuint,
        buf_size: GLsizei,
        length: *mut GLsizei,
        info_log: *mut GLchar,
    ),
    pub GetProgramiv: unsafe extern "C" fn(program: GLuint, pname: GLenum, params: *mut GLint),
    pub GetShaderInfoLog: unsafe extern "C" fn(
        shader: GLuint,
        buf_size: GLsizei,
        length: *mut GLsizei,
        info_log: *mut GLchar,
    ),
    pub GetShaderiv: unsafe extern "C" fn(shader: GLuint, pname: GLenum, params: *mut GLint),
    pub GetString: unsafe extern "C" fn(name: GLenum) -> *const GLubyte,
    pub LinkProgram: unsafe extern "C" fn(program: GLuint),
    pub ShaderSource: unsafe extern "C" fn(
        shader: GLuint,
        count: GLsizei,
        string: *const *const GLchar,
        length: *const GLint,
    ),
    pub UseProgram: unsafe extern "C" fn(program: GLuint),
    pub VertexAttribPointer: unsafe extern "C" fn(
        index: GLuint,
        size: GLint,
        r#type: GLenum,
        normalized: GLboolean,
        stride: GLsizei,
        pointer: *const c_void,
    ),
    pub Viewport: unsafe extern "C" fn(x: GLint, y: GLint, width: GLsizei, height: GLsizei),
}

impl Lib {
    /// # Safety
    ///
    /// get_proc_address must resolve names against a current context whose
    /// lifetime covers all use of the returned table.
    pub unsafe fn load_with<F>(mut get_proc_address: F) -> Result<Self, LoadError>
    where
        F: FnMut(*const c_char) -> *mut c_void,
    {
        let gpa = &mut get_proc_address;
        unsafe {
            Ok(Self {
                AttachShader: lookup(gpa, c"glAttachShader")?,
                BindBuffer: lookup(gpa, c"glBindBuffer")?,
                BindVertexArray: lookup(gpa, c"glBindVertexArray")?,
                BufferData: lookup(gpa, c"glBufferData")?,
                Clear: lookup(gpa, c"glClear")?,
                ClearColor: lookup(gpa, c"glClearColor")?,
                CompileShader: lookup(gpa, c"glCompileShader")?,
                CreateProgram: lookup(gpa, c"glCreateProgram")?,
                CreateShader: lookup(gpa, c"glCreateShader")?,
                DeleteBuffers: lookup(gpa, c"glDeleteBuffers")?,
                DeleteProgram: lookup(gpa, c"glDeleteProgram")?,
                DeleteShader: lookup(gpa, c"glDeleteShader")?,
                DeleteVertexArrays: lookup(gpa, c"glDeleteVertexArrays")?,
                DetachShader: lookup(gpa, c"glDetachShader")?,
                DrawArrays: lookup(gpa, c"glDrawArrays")?,
                DrawBuffer: lookup(gpa, c"glDrawBuffer")?,
                EnableVertexAttribArray: lookup(gpa, c"glEnableVertexAttribArray")?,
                GenBuffers: lookup(gpa, c"glGenBuffers")?,
                GenVertexArrays: lookup(gpa, c"glGenVertexArrays")?,
                GetError: lookup(gpa, c"glGetError")?,
                GetProgramInfoLog: lookup(gpa, c"glGetProgramInfoLog")?,
                GetProgramiv: lookup(gpa, c"glGetProgramiv")?,
                GetShaderInfoLog: lookup(gpa, c"glGetShaderInfoLog")?,
                GetShaderiv: lookup(gpa, c"glGetShaderiv")?,
                GetString: lookup(gpa, c"glGetString")?,
                LinkProgram: lookup(gpa, c"glLinkProgram")?,
                ShaderSource: lookup(gpa, c"glShaderSource")?,
                UseProgram: lookup(gpa, c"glUseProgram")?,
                VertexAttribPointer: lookup(gpa, c"glVertexAttribPointer")?,
                Viewport: lookup(gpa, c"glViewport")?,
            })
        }
    }
}
