//! An in-memory [`ShaderBackend`] for unit tests.
//!
//! The "compiler" only knows a few rules: a stage needs a `main`, balanced
//! brackets, and every assignment line ends in `;`. Linking checks that each
//! fragment `in` is written by a vertex `out`. Uniforms are every
//! `uniform <type> <name>;` declaration in either stage.

use std::{cell::RefCell, collections::HashMap};

use crate::{backend::ShaderBackend, shader::ShaderStage};

pub(crate) const PASS_THROUGH_VERT: &str = "#version 330 core
layout (location = 0) in vec3 aPos;
void main()
{
    gl_Position = vec4(aPos, 1.0);
}
";

pub(crate) const FIXED_COLOR_FRAG: &str = "#version 330 core
out vec4 FragColor;
void main()
{
    FragColor = vec4(1.0, 1.0, 0.0, 1.0);
}
";

pub(crate) const COLOR_FRAG: &str = "#version 330 core
out vec4 FragColor;
in vec3 VertexColor;
void main()
{
    FragColor = vec4(VertexColor, 1.0);
}
";

pub(crate) const OFFSET_VERT: &str = "#version 330 core
layout (location = 0) in vec3 aPos;
uniform float uOffsetX;
uniform int uFrame;
uniform bool uFlip;
void main()
{
    gl_Position = vec4(aPos.x + uOffsetX, aPos.y, aPos.z, 1.0);
}
";

pub(crate) const TRANSFORM_VERT: &str = "#version 330 core
layout (location = 0) in vec3 aPos;
uniform vec2 uScale;
uniform vec3 uShift;
uniform vec4 uTint;
uniform mat4 uModel;
uniform bool uEnabled;
void main()
{
    gl_Position = uModel * vec4(aPos * vec3(uScale, 1.0) + uShift, 1.0);
}
";

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum FakeValue {
    Int(i32),
    Float(f32),
    Floats(Vec<f32>),
}

#[derive(Debug)]
pub(crate) struct FakeLocation {
    program: u32,
    index: usize,
}

struct FakeShader {
    stage: ShaderStage,
    source: String,
    log: String,
}

#[derive(Default)]
struct FakeProgram {
    attached: Vec<u32>,
    log: String,
    uniforms: Vec<(String, Option<FakeValue>)>,
}

#[derive(Default)]
struct State {
    next_id: u32,
    compiled: usize,
    fail_create: bool,
    active: Option<u32>,
    shaders: HashMap<u32, FakeShader>,
    programs: HashMap<u32, FakeProgram>,
    deleted_programs: usize,
}

impl State {
    fn allocate(&mut self) -> Result<u32, String> {
        if self.fail_create {
            return Err("out of memory".to_string());
        }
        self.next_id += 1;
        Ok(self.next_id)
    }
}

#[derive(Default)]
pub(crate) struct FakeBackend {
    state: RefCell<State>,
}

impl FakeBackend {
    pub(crate) fn fail_object_creation(&self) {
        self.state.borrow_mut().fail_create = true;
    }

    pub(crate) fn live_shaders(&self) -> usize {
        self.state.borrow().shaders.len()
    }

    pub(crate) fn live_programs(&self) -> usize {
        self.state.borrow().programs.len()
    }

    pub(crate) fn deleted_programs(&self) -> usize {
        self.state.borrow().deleted_programs
    }

    pub(crate) fn compiled_shaders(&self) -> usize {
        self.state.borrow().compiled
    }

    pub(crate) fn created_objects(&self) -> u32 {
        self.state.borrow().next_id
    }

    pub(crate) fn active_program(&self) -> Option<u32> {
        self.state.borrow().active
    }

    pub(crate) fn uniform(&self, program: u32, name: &str) -> Option<FakeValue> {
        let state = self.state.borrow();
        state
            .programs
            .get(&program)?
            .uniforms
            .iter()
            .find(|(n, _)| n == name)
            .and_then(|(_, value)| value.clone())
    }

    fn write_uniform(&self, location: &FakeLocation, value: FakeValue) {
        let mut state = self.state.borrow_mut();
        assert_eq!(
            state.active,
            Some(location.program),
            "uniform upload to a program that is not active"
        );
        let program = state
            .programs
            .get_mut(&location.program)
            .expect("uniform upload to a deleted program");
        program.uniforms[location.index].1 = Some(value);
    }
}

fn check_source(source: &str) -> Result<(), String> {
    if !source.contains("void main()") {
        return Err("0:1(1): error: no function with name 'main'".to_string());
    }
    let mut depth = 0i32;
    for (number, line) in source.lines().enumerate() {
        for c in line.chars() {
            match c {
                '{' | '(' => depth += 1,
                '}' | ')' => depth -= 1,
                _ => {}
            }
        }
        let line = line.trim();
        if line.contains('=') && !line.ends_with(';') {
            return Err(format!(
                "0:{}(1): error: syntax error, unexpected end of statement",
                number + 2
            ));
        }
    }
    if depth != 0 {
        return Err("0:1(1): error: syntax error, unbalanced brackets".to_string());
    }
    Ok(())
}

/// Names declared with the given qualifier, e.g. `out vec3 Color;` gives `Color`.
fn declarations<'a>(source: &'a str, qualifier: &'a str) -> impl Iterator<Item = &'a str> {
    source.lines().filter_map(move |line| {
        let rest = line.trim().strip_prefix(qualifier)?.strip_prefix(' ')?;
        rest.trim_end_matches(';').split_whitespace().last()
    })
}

impl ShaderBackend for FakeBackend {
    type Shader = u32;
    type Program = u32;
    type UniformLocation = FakeLocation;

    fn create_shader(&self, stage: ShaderStage) -> Result<u32, String> {
        let mut state = self.state.borrow_mut();
        let id = state.allocate()?;
        state.shaders.insert(
            id,
            FakeShader {
                stage,
                source: String::new(),
                log: String::new(),
            },
        );
        Ok(id)
    }

    fn compile_shader(&self, shader: u32, source: &str) -> bool {
        let mut state = self.state.borrow_mut();
        state.compiled += 1;
        let shader = state.shaders.get_mut(&shader).expect("compile of unknown shader");
        shader.source = source.to_string();
        match check_source(source) {
            Ok(()) => true,
            Err(log) => {
                shader.log = log;
                false
            }
        }
    }

    fn shader_info_log(&self, shader: u32) -> String {
        self.state.borrow().shaders[&shader].log.clone()
    }

    fn delete_shader(&self, shader: u32) {
        let removed = self.state.borrow_mut().shaders.remove(&shader);
        assert!(removed.is_some(), "double delete of shader {shader}");
    }

    fn create_program(&self) -> Result<u32, String> {
        let mut state = self.state.borrow_mut();
        let id = state.allocate()?;
        state.programs.insert(id, FakeProgram::default());
        Ok(id)
    }

    fn attach_shader(&self, program: u32, shader: u32) {
        let mut state = self.state.borrow_mut();
        assert!(state.shaders.contains_key(&shader), "attach of unknown shader");
        state.programs.get_mut(&program).unwrap().attached.push(shader);
    }

    fn detach_shader(&self, program: u32, shader: u32) {
        let mut state = self.state.borrow_mut();
        state
            .programs
            .get_mut(&program)
            .unwrap()
            .attached
            .retain(|s| *s != shader);
    }

    fn link_program(&self, program: u32) -> bool {
        let mut state = self.state.borrow_mut();
        let state = &mut *state;
        let fake = state.programs.get_mut(&program).unwrap();

        let stage_source = |stage: ShaderStage| {
            fake.attached
                .iter()
                .map(|id| &state.shaders[id])
                .find(|s| s.stage == stage)
                .map(|s| s.source.as_str())
        };
        let (Some(vert), Some(frag)) = (
            stage_source(ShaderStage::Vertex),
            stage_source(ShaderStage::Fragment),
        ) else {
            fake.log = "error: program needs a vertex and a fragment shader".to_string();
            return false;
        };

        let outputs: Vec<&str> = declarations(vert, "out").collect();
        if let Some(missing) = declarations(frag, "in").find(|name| !outputs.contains(name)) {
            fake.log = format!(
                "error: fragment shader input `{missing}` is not written by the vertex shader"
            );
            return false;
        }

        let mut uniforms: Vec<(String, Option<FakeValue>)> = Vec::new();
        for name in declarations(vert, "uniform").chain(declarations(frag, "uniform")) {
            if !uniforms.iter().any(|(n, _)| n == name) {
                uniforms.push((name.to_string(), None));
            }
        }
        fake.uniforms = uniforms;
        fake.log.clear();
        true
    }

    fn program_info_log(&self, program: u32) -> String {
        self.state.borrow().programs[&program].log.clone()
    }

    fn delete_program(&self, program: u32) {
        let mut state = self.state.borrow_mut();
        assert!(
            state.programs.remove(&program).is_some(),
            "double delete of program {program}"
        );
        state.deleted_programs += 1;
        if state.active == Some(program) {
            state.active = None;
        }
    }

    fn use_program(&self, program: Option<u32>) {
        self.state.borrow_mut().active = program;
    }

    fn uniform_location(&self, program: u32, name: &str) -> Option<FakeLocation> {
        let state = self.state.borrow();
        let index = state.programs.get(&program)?.uniforms.iter().position(|(n, _)| n == name)?;
        Some(FakeLocation { program, index })
    }

    fn uniform_1_i32(&self, location: &FakeLocation, x: i32) {
        self.write_uniform(location, FakeValue::Int(x));
    }

    fn uniform_1_f32(&self, location: &FakeLocation, x: f32) {
        self.write_uniform(location, FakeValue::Float(x));
    }

    fn uniform_2_f32(&self, location: &FakeLocation, x: f32, y: f32) {
        self.write_uniform(location, FakeValue::Floats(vec![x, y]));
    }

    fn uniform_3_f32(&self, location: &FakeLocation, x: f32, y: f32, z: f32) {
        self.write_uniform(location, FakeValue::Floats(vec![x, y, z]));
    }

    fn uniform_4_f32(&self, location: &FakeLocation, x: f32, y: f32, z: f32, w: f32) {
        self.write_uniform(location, FakeValue::Floats(vec![x, y, z, w]));
    }

    fn uniform_matrix_4_f32(&self, location: &FakeLocation, columns: &[f32; 16]) {
        self.write_uniform(location, FakeValue::Floats(columns.to_vec()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_sources_compile() {
        for source in [PASS_THROUGH_VERT, FIXED_COLOR_FRAG, COLOR_FRAG, OFFSET_VERT, TRANSFORM_VERT] {
            assert_eq!(check_source(source), Ok(()));
        }
    }

    #[test]
    fn test_declarations() {
        let names: Vec<_> = declarations(TRANSFORM_VERT, "uniform").collect();
        assert_eq!(names, ["uScale", "uShift", "uTint", "uModel", "uEnabled"]);
        assert_eq!(declarations(COLOR_FRAG, "in").collect::<Vec<_>>(), ["VertexColor"]);
        // layout-qualified inputs are vertex attributes, not varyings
        assert_eq!(declarations(PASS_THROUGH_VERT, "in").count(), 0);
    }
}
