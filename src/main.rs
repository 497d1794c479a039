use std::{path::PathBuf, time::Instant};

use glow::HasContext;
use sdl2::{
    event::{Event, WindowEvent},
    keyboard::Keycode,
};

use crate::{abs::*, config::Config, input::*};

mod abs;
mod check;
mod config;
mod input;
mod lessons;
mod logging;

const USAGE: &str = "usage: hellogl [LESSON] [--frames N] [--screenshot PATH]
       hellogl --list
       hellogl --check";

/// Parsed command line.
#[derive(Debug, Default, PartialEq)]
struct Args {
    lesson: Option<String>,
    frames: Option<u64>,
    screenshot: Option<PathBuf>,
    list: bool,
    check: bool,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args, String> {
    let mut parsed = Args::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--list" => parsed.list = true,
            "--check" => parsed.check = true,
            "--frames" => {
                let value = args.next().ok_or("--frames needs a value")?;
                let frames = value
                    .parse()
                    .map_err(|e| format!("invalid frame count `{value}`: {e}"))?;
                parsed.frames = Some(frames);
            }
            "--screenshot" => {
                let value = args.next().ok_or("--screenshot needs a path")?;
                parsed.screenshot = Some(PathBuf::from(value));
            }
            "-h" | "--help" => return Err(USAGE.to_string()),
            flag if flag.starts_with('-') => {
                return Err(format!("unknown option `{flag}`\n{USAGE}"));
            }
            lesson => {
                if parsed.lesson.replace(lesson.to_string()).is_some() {
                    return Err(format!("only one lesson can run at a time\n{USAGE}"));
                }
            }
        }
    }
    // a screenshot is taken after the last frame, so there has to be one
    if parsed.screenshot.is_some() && parsed.frames.is_none() {
        parsed.frames = Some(1);
    }
    Ok(parsed)
}

fn main() {
    let config = Config::load();
    let configured_level = config.as_ref().map_or("info", |c| c.log_level.as_str());
    logging::init(logging::level(
        configured_level,
        std::env::var("RUST_LOG").ok().as_deref(),
    ));

    let result = config.and_then(|config| {
        let args = parse_args(std::env::args().skip(1))?;
        run(&config, &args)
    });
    if let Err(e) = result {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run(config: &Config, args: &Args) -> Result<(), String> {
    let lessons = lessons::registry();

    if args.list {
        for name in lessons.keys() {
            println!("{name}");
        }
        return Ok(());
    }

    if args.check {
        let app = App::new(config, true)?;
        return check::run(&app.gl);
    }

    let name = args.lesson.as_deref().unwrap_or(&config.default_lesson);
    let ctor = lessons.get(name).ok_or_else(|| {
        let known: Vec<_> = lessons.keys().copied().collect();
        format!("unknown lesson `{name}` (known: {})", known.join(", "))
    })?;

    let mut app = App::new(config, false)?;
    let mut lesson = ctor(&app.gl, config)?;
    log::info!("running lesson {name}");

    let [r, g, b, a] = config.clear_color;
    let mut keyboard = KeyboardState::default();
    let start = Instant::now();
    let mut last_frame_time = start;
    let mut frame = 0u64;

    'running: loop {
        keyboard.begin_frame();
        for event in app.event_pump.poll_iter() {
            keyboard.handle_event(&event);
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => break 'running,
                Event::Window {
                    win_event: WindowEvent::Resized(width, height),
                    ..
                } => unsafe {
                    app.gl.viewport(0, 0, width, height);
                },
                _ => {}
            }
        }

        let now = Instant::now();
        let ctx = FrameContext::new(
            &keyboard,
            now.duration_since(start).as_secs_f32(),
            now.duration_since(last_frame_time).as_secs_f32(),
        );
        last_frame_time = now;
        lesson.update(&ctx);

        unsafe {
            app.gl.clear_color(r, g, b, a);
            app.gl.clear(glow::COLOR_BUFFER_BIT);
        }
        lesson.render(&app.gl);
        frame += 1;

        if args.frames.is_some_and(|limit| frame >= limit) {
            if let Some(path) = &args.screenshot {
                let (width, height) = app.drawable_size();
                capture(&app.gl, width, height)
                    .save(path)
                    .map_err(|e| format!("failed to save screenshot {}: {e}", path.display()))?;
                log::info!("saved screenshot to {}", path.display());
            }
            break 'running;
        }

        app.window.gl_swap_window();
    }

    log::info!("{frame} frames rendered");
    Ok(())
}
