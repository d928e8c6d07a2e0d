use anyhow::anyhow;

fn stage_name(r#type: gl::GLenum) -> &'static str {
    match r#type {
        gl::VERTEX_SHADER => "vertex",
        gl::FRAGMENT_SHADER => "fragment",
        _ => "unknown",
    }
}

pub unsafe fn create_shader(
    gl_api: &gl::Api,
    source: &str,
    r#type: gl::GLenum,
) -> anyhow::Result<gl::Shader> {
    unsafe {
        let shader = gl_api.create_shader(r#type)?;
        gl_api.shader_source(shader, source);
        gl_api.compile_shader(shader);

        if gl_api.get_shader_parameter(shader, gl::COMPILE_STATUS) == gl::FALSE as gl::GLint {
            let info_log = gl_api.get_shader_info_log(shader);
            return Err(anyhow!(
                "could not compile {} shader: {info_log}",
                stage_name(r#type)
            ));
        }
        Ok(shader)
    }
}

pub unsafe fn create_program(
    gl_api: &gl::Api,
    vert_src: &str,
    frag_src: &str,
) -> anyhow::Result<gl::Program> {
    unsafe {
        let stages = [
            create_shader(gl_api, vert_src, gl::VERTEX_SHADER)?,
            create_shader(gl_api, frag_src, gl::FRAGMENT_SHADER)?,
        ];

        let program = gl_api.create_program()?;
        for stage in stages {
            gl_api.attach_shader(program, stage);
        }
        gl_api.link_program(program);
        // NOTE: the linked program keeps its binary alive; the stage objects
        // are free to go right away.
        for stage in stages {
            gl_api.detach_shader(program, stage);
            gl_api.delete_shader(stage);
        }

        if gl_api.get_program_parameter(program, gl::LINK_STATUS) == gl::FALSE as gl::GLint {
            let info_log = gl_api.get_program_info_log(program);
            return Err(anyhow!("could not link program: {info_log}"));
        }
        Ok(program)
    }
}
