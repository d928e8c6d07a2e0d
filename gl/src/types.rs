#![allow(non_camel_case_types)]

use std::ffi::{c_char, c_int, c_uint};

pub type GLboolean = u8;
pub type GLbitfield = c_uint;
pub type GLenum = c_uint;
pub type GLint = c_int;
pub type GLuint = c_uint;
pub type GLsizei = c_int;
pub type GLfloat = f32;
pub type GLchar = c_char;
pub type GLubyte = u8;
/// khrplatform's signed size type (ssize_t, not size_t).
pub type GLsizeiptr = isize;
