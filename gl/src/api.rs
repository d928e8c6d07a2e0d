use std::ffi::{CStr, c_char, c_void};
use std::num::NonZero;

use anyhow::{Context as _, anyhow};

use crate::enums::*;
use crate::libgl;
use crate::types::*;

pub type Buffer = NonZero<GLuint>;
pub type Program = NonZero<GLuint>;
pub type Shader = NonZero<GLuint>;
pub type VertexArray = NonZero<GLuint>;

pub struct Api {
    lib: libgl::Lib,
}

impl Api {
    /// # Safety
    ///
    /// see [`libgl::Lib::load_with`].
    pub unsafe fn load_with<F>(get_proc_address: F) -> Result<Self, libgl::LoadError>
    where
        F: FnMut(*const c_char) -> *mut c_void,
    {
        Ok(Self {
            lib: unsafe { libgl::Lib::load_with(get_proc_address) }?,
        })
    }

    #[inline]
    pub unsafe fn clear(&self, mask: GLbitfield) {
        unsafe { (self.lib.Clear)(mask) };
    }

    #[inline]
    pub unsafe fn clear_color(&self, red: GLfloat, green: GLfloat, blue: GLfloat, alpha: GLfloat) {
        unsafe { (self.lib.ClearColor)(red, green, blue, alpha) };
    }

    #[inline]
    pub unsafe fn viewport(&self, x: GLint, y: GLint, width: GLsizei, height: GLsizei) {
        unsafe { (self.lib.Viewport)(x, y, width, height) };
    }

    #[inline]
    pub unsafe fn draw_buffer(&self, buf: GLenum) {
        unsafe { (self.lib.DrawBuffer)(buf) };
    }

    #[inline]
    pub unsafe fn draw_arrays(&self, mode: GLenum, first: GLint, count: GLsizei) {
        unsafe { (self.lib.DrawArrays)(mode, first, count) };
    }

    #[inline]
    pub unsafe fn get_error(&self) -> Option<GLenum> {
        let ret = unsafe { (self.lib.GetError)() };
        (ret != NO_ERROR).then_some(ret)
    }

    #[inline]
    pub unsafe fn get_string(&self, name: GLenum) -> anyhow::Result<String> {
        let ptr = unsafe { (self.lib.GetString)(name) };
        if ptr.is_null() {
            return Err(anyhow!("could not get string (name {name:#x})"));
        }
        unsafe { CStr::from_ptr(ptr.cast()) }
            .to_str()
            .context("invalid string")
            .map(|str| str.to_string())
    }

    // buffers

    #[inline]
    pub unsafe fn create_buffer(&self) -> anyhow::Result<Buffer> {
        let mut buffer: GLuint = 0;
        unsafe { (self.lib.GenBuffers)(1, &mut buffer) };
        NonZero::new(buffer).context("could not create buffer")
    }

    #[inline]
    pub unsafe fn bind_buffer(&self, target: GLenum, buffer: Option<Buffer>) {
        unsafe { (self.lib.BindBuffer)(target, buffer.map_or_else(|| 0, |v| v.get())) };
    }

    #[inline]
    pub unsafe fn buffer_data(
        &self,
        target: GLenum,
        size: GLsizeiptr,
        data: *const c_void,
        usage: GLenum,
    ) {
        unsafe { (self.lib.BufferData)(target, size, data, usage) };
    }

    #[inline]
    pub unsafe fn delete_buffer(&self, buffer: Buffer) {
        unsafe { (self.lib.DeleteBuffers)(1, &buffer.get()) };
    }

    // vertex arrays

    #[inline]
    pub unsafe fn create_vertex_array(&self) -> anyhow::Result<VertexArray> {
        let mut array: GLuint = 0;
        unsafe { (self.lib.GenVertexArrays)(1, &mut array) };
        NonZero::new(array).context("could not create vertex array")
    }

    #[inline]
    pub unsafe fn bind_vertex_array(&self, array: Option<VertexArray>) {
        unsafe { (self.lib.BindVertexArray)(array.map_or_else(|| 0, |v| v.get())) };
    }

    #[inline]
    pub unsafe fn delete_vertex_array(&self, array: VertexArray) {
        unsafe { (self.lib.DeleteVertexArrays)(1, &array.get()) };
    }

    #[inline]
    pub unsafe fn enable_vertex_attrib_array(&self, index: GLuint) {
        unsafe { (self.lib.EnableVertexAttribArray)(index) };
    }

    #[inline]
    pub unsafe fn vertex_attrib_pointer(
        &self,
        index: GLuint,
        size: GLint,
        r#type: GLenum,
        normalized: GLboolean,
        stride: GLsizei,
        pointer: *const c_void,
    ) {
        unsafe { (self.lib.VertexAttribPointer)(index, size, r#type, normalized, stride, pointer) };
    }

    // shaders

    #[inline]
    pub unsafe fn create_shader(&self, r#type: GLenum) -> anyhow::Result<Shader> {
        let shader = unsafe { (self.lib.CreateShader)(r#type) };
        NonZero::new(shader).context("could not create shader")
    }

    #[inline]
    pub unsafe fn shader_source(&self, shader: Shader, source: &str) {
        unsafe {
            (self.lib.ShaderSource)(
                shader.get(),
                1,
                &(source.as_ptr() as *const GLchar),
                &(source.len() as GLint),
            )
        };
    }

    #[inline]
    pub unsafe fn compile_shader(&self, shader: Shader) {
        unsafe { (self.lib.CompileShader)(shader.get()) };
    }

    #[inline]
    pub unsafe fn get_shader_parameter(&self, shader: Shader, pname: GLenum) -> GLint {
        let mut param: GLint = 0;
        unsafe { (self.lib.GetShaderiv)(shader.get(), pname, &mut param) };
        param
    }

    #[inline]
    pub unsafe fn get_shader_info_log(&self, shader: Shader) -> String {
        let buf_size = unsafe { self.get_shader_parameter(shader, INFO_LOG_LENGTH) };
        let mut info_log = vec![0u8; buf_size.max(0) as usize];
        let mut len: GLsizei = 0;
        unsafe {
            (self.lib.GetShaderInfoLog)(
                shader.get(),
                buf_size,
                &mut len,
                info_log.as_mut_ptr() as *mut GLchar,
            );
        }
        info_log.truncate(len.max(0) as usize);
        String::from_utf8_lossy(&info_log).into_owned()
    }

    #[inline]
    pub unsafe fn delete_shader(&self, shader: Shader) {
        unsafe { (self.lib.DeleteShader)(shader.get()) };
    }

    // programs

    #[inline]
    pub unsafe fn create_program(&self) -> anyhow::Result<Program> {
        let program = unsafe { (self.lib.CreateProgram)() };
        NonZero::new(program).context("could not create program")
    }

    #[inline]
    pub unsafe fn attach_shader(&self, program: Program, shader: Shader) {
        unsafe { (self.lib.AttachShader)(program.get(), shader.get()) };
    }

    #[inline]
    pub unsafe fn detach_shader(&self, program: Program, shader: Shader) {
        unsafe { (self.lib.DetachShader)(program.get(), shader.get()) };
    }

    #[inline]
    pub unsafe fn link_program(&self, program: Program) {
        unsafe { (self.lib.LinkProgram)(program.get()) };
    }

    #[inline]
    pub unsafe fn get_program_parameter(&self, program: Program, pname: GLenum) -> GLint {
        let mut param: GLint = 0;
        unsafe { (self.lib.GetProgramiv)(program.get(), pname, &mut param) };
        param
    }

    #[inline]
    pub unsafe fn get_program_info_log(&self, program: Program) -> String {
        let buf_size = unsafe { self.get_program_parameter(program, INFO_LOG_LENGTH) };
        let mut info_log = vec![0u8; buf_size.max(0) as usize];
        let mut len: GLsizei = 0;
        unsafe {
            (self.lib.GetProgramInfoLog)(
                program.get(),
                buf_size,
                &mut len,
                info_log.as_mut_ptr() as *mut GLchar,
            );
        }
        info_log.truncate(len.max(0) as usize);
        String::from_utf8_lossy(&info_log).into_owned()
    }

    #[inline]
    pub unsafe fn delete_program(&self, program: Program) {
        unsafe { (self.lib.DeleteProgram)(program.get()) };
    }

    #[inline]
    pub unsafe fn use_program(&self, program: Option<Program>) {
        unsafe { (self.lib.UseProgram)(program.map_or_else(|| 0, |v| v.get())) };
    }
}
