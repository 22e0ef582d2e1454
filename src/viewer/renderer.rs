//! Instanced quad renderer for map tiles and markers.

use std::mem;
use std::sync::Arc;

use glam::{Mat4, Vec2, Vec3};
use glow::*;

use tile_camera::constants::MARKER_SCALE;
use tile_camera::Camera;

use super::map::TileMap;

const VERTEX_SHADER_SRC: &str = r#"#version 330 core
layout (location = 0) in vec2 aPos;
layout (location = 1) in vec2 aInstancePos;
layout (location = 2) in float aInstanceSize;
layout (location = 3) in vec3 aInstanceColor;

uniform mat4 uProjection;

out vec3 vColor;

void main() {
    vec2 worldPos = aInstancePos + aPos * aInstanceSize;
    gl_Position = uProjection * vec4(worldPos, 0.0, 1.0);
    vColor = aInstanceColor;
}
"#;

const FRAGMENT_SHADER_SRC: &str = r#"#version 330 core
in vec3 vColor;
out vec4 FragColor;

void main() {
    FragColor = vec4(vColor, 1.0);
}
"#;

/// Position (2) + size (1) + color (3)
const FLOATS_PER_INSTANCE: usize = 6;

pub struct Renderer {
    gl: Arc<glow::Context>,
    program: NativeProgram,
    vao: NativeVertexArray,
    vbo: NativeBuffer,
    instance_vbo: NativeBuffer,
    projection_loc: NativeUniformLocation,
    instance_data: Vec<f32>,
}

impl Renderer {
    pub fn new(gl: Arc<glow::Context>) -> Result<Self, String> {
        unsafe {
            let vertex_shader = gl
                .create_shader(VERTEX_SHADER)
                .map_err(|e| format!("Failed to create vertex shader: {}", e))?;
            gl.shader_source(vertex_shader, VERTEX_SHADER_SRC);
            gl.compile_shader(vertex_shader);
            if !gl.get_shader_compile_status(vertex_shader) {
                return Err(gl.get_shader_info_log(vertex_shader));
            }

            let fragment_shader = gl
                .create_shader(FRAGMENT_SHADER)
                .map_err(|e| format!("Failed to create fragment shader: {}", e))?;
            gl.shader_source(fragment_shader, FRAGMENT_SHADER_SRC);
            gl.compile_shader(fragment_shader);
            if !gl.get_shader_compile_status(fragment_shader) {
                return Err(gl.get_shader_info_log(fragment_shader));
            }

            let program = gl
                .create_program()
                .map_err(|e| format!("Failed to create program: {}", e))?;
            gl.attach_shader(program, vertex_shader);
            gl.attach_shader(program, fragment_shader);
            gl.link_program(program);
            if !gl.get_program_link_status(program) {
                return Err(gl.get_program_info_log(program));
            }

            gl.delete_shader(vertex_shader);
            gl.delete_shader(fragment_shader);

            let projection_loc = gl
                .get_uniform_location(program, "uProjection")
                .ok_or("Failed to get projection uniform location")?;

            // Unit quad, scaled per instance
            let vertices: [f32; 12] = [
                0.0, 0.0, //
                1.0, 0.0, //
                1.0, 1.0, //
                0.0, 0.0, //
                1.0, 1.0, //
                0.0, 1.0, //
            ];

            let vao = gl
                .create_vertex_array()
                .map_err(|e| format!("Failed to create VAO: {}", e))?;
            gl.bind_vertex_array(Some(vao));

            let vbo = gl
                .create_buffer()
                .map_err(|e| format!("Failed to create VBO: {}", e))?;
            gl.bind_buffer(ARRAY_BUFFER, Some(vbo));
            gl.buffer_data_u8_slice(ARRAY_BUFFER, as_u8_slice(&vertices), STATIC_DRAW);

            gl.enable_vertex_attrib_array(0);
            gl.vertex_attrib_pointer_f32(0, 2, FLOAT, false, 8, 0);

            let instance_vbo = gl
                .create_buffer()
                .map_err(|e| format!("Failed to create instance VBO: {}", e))?;
            gl.bind_buffer(ARRAY_BUFFER, Some(instance_vbo));

            let stride = (FLOATS_PER_INSTANCE * mem::size_of::<f32>()) as i32;

            gl.enable_vertex_attrib_array(1);
            gl.vertex_attrib_pointer_f32(1, 2, FLOAT, false, stride, 0);
            gl.vertex_attrib_divisor(1, 1);

            gl.enable_vertex_attrib_array(2);
            gl.vertex_attrib_pointer_f32(2, 1, FLOAT, false, stride, 8);
            gl.vertex_attrib_divisor(2, 1);

            gl.enable_vertex_attrib_array(3);
            gl.vertex_attrib_pointer_f32(3, 3, FLOAT, false, stride, 12);
            gl.vertex_attrib_divisor(3, 1);

            gl.bind_vertex_array(None);

            gl.clear_color(0.05, 0.08, 0.15, 1.0);

            Ok(Self {
                gl,
                program,
                vao,
                vbo,
                instance_vbo,
                projection_loc,
                instance_data: Vec::new(),
            })
        }
    }

    pub fn resize(&self, width: i32, height: i32) {
        unsafe {
            self.gl.viewport(0, 0, width, height);
        }
    }

    /// Draw the visible part of the map, then the markers on top.
    pub fn render(&mut self, camera: &Camera, map: &TileMap, markers: &[(Vec2, Vec3)]) {
        puffin::profile_function!();
        unsafe {
            self.gl.clear(COLOR_BUFFER_BIT);
        }

        let projection = screen_projection(camera);
        let tile = map.tile_size();

        {
            puffin::profile_scope!("render_tiles");
            self.instance_data.clear();
            let (min_x, max_x, min_y, max_y) = camera.view().visible_tiles();
            for y in min_y..=max_y {
                for x in min_x..=max_x {
                    if let Some(terrain) = map.get(x, y) {
                        let origin = Vec2::new(x as f32, y as f32) * tile;
                        push_instance(&mut self.instance_data, origin, tile, terrain.color());
                    }
                }
            }
            self.draw_instances(&projection);
        }

        {
            puffin::profile_scope!("render_markers");
            self.instance_data.clear();
            let size = tile * MARKER_SCALE;
            for &(center, color) in markers {
                push_instance(&mut self.instance_data, center - size / 2.0, size, color);
            }
            self.draw_instances(&projection);
        }
    }

    fn draw_instances(&self, projection: &Mat4) {
        if self.instance_data.is_empty() {
            return;
        }
        unsafe {
            self.gl.use_program(Some(self.program));
            self.gl.bind_vertex_array(Some(self.vao));

            self.gl.bind_buffer(ARRAY_BUFFER, Some(self.instance_vbo));
            self.gl.buffer_data_u8_slice(
                ARRAY_BUFFER,
                as_u8_slice(&self.instance_data),
                DYNAMIC_DRAW,
            );

            self.gl.uniform_matrix_4_f32_slice(
                Some(&self.projection_loc),
                false,
                projection.as_ref(),
            );

            let instance_count = self.instance_data.len() / FLOATS_PER_INSTANCE;
            self.gl.draw_arrays_instanced(TRIANGLES, 0, 6, instance_count as i32);

            self.gl.bind_vertex_array(None);
        }
    }
}

impl Drop for Renderer {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_program(self.program);
            self.gl.delete_vertex_array(self.vao);
            self.gl.delete_buffer(self.vbo);
            self.gl.delete_buffer(self.instance_vbo);
        }
    }
}

/// World to clip space: the camera maps world to screen pixels, then a
/// pixel-space orthographic projection (y down) maps pixels to clip space.
pub fn screen_projection(camera: &Camera) -> Mat4 {
    let viewport = camera.view().viewport().as_vec2();
    let pixels = Mat4::orthographic_rh_gl(0.0, viewport.x, viewport.y, 0.0, -1.0, 1.0);
    pixels * camera.transformation_matrix()
}

fn push_instance(data: &mut Vec<f32>, origin: Vec2, size: f32, color: Vec3) {
    data.extend_from_slice(&[origin.x, origin.y, size, color.x, color.y, color.z]);
}

fn as_u8_slice<T>(data: &[T]) -> &[u8] {
    unsafe { std::slice::from_raw_parts(data.as_ptr() as *const u8, mem::size_of_val(data)) }
}
