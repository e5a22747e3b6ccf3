// src/main.rs

// Declare modules
pub mod color;
pub mod config;
pub mod export;
pub mod font;
pub mod mapper;
pub mod math;
pub mod pipeline;
pub mod quiz;
pub mod raster;
pub mod scene;
pub mod view;

use crate::config::Config;
use crate::export::ExportSnapshot;
use crate::pipeline::PlotPipeline;
use crate::quiz::{OptionFeedback, QuestionBank, QuizSession};

use anyhow::{bail, Context, Result};
use log::{info, warn};
use std::io::{BufRead, Write};

const USAGE: &str = "usage:
  quadtutor render a b c [x] [out.ppm]   plot the parabola and print readouts
  quadtutor export a b c [out.html]      write the standalone artifact
  quadtutor quiz                         run the practice quiz on stdin";

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    let config = Config::load_or_default()?;

    match args.get(1).map(String::as_str) {
        Some("render") => run_render(&args[2..], &config),
        Some("export") => run_export(&args[2..], &config),
        Some("quiz") => run_quiz(),
        _ => bail!("{USAGE}"),
    }
}

/// Parses the three required coefficients from the front of `args`.
fn parse_coefficients(args: &[String]) -> Result<(f64, f64, f64)> {
    let mut values = [0.0_f64; 3];
    for (i, name) in ["a", "b", "c"].iter().enumerate() {
        let raw = args
            .get(i)
            .with_context(|| format!("missing coefficient {name}\n{USAGE}"))?;
        values[i] = raw
            .parse()
            .with_context(|| format!("coefficient {name} is not a number: {raw:?}"))?;
    }
    Ok((values[0], values[1], values[2]))
}

/// The evaluation point is optional and forgiving: a missing or malformed
/// value falls back to 0 rather than failing the run.
fn parse_eval_point(raw: Option<&String>) -> f64 {
    match raw {
        None => 0.0,
        Some(s) => s.parse().unwrap_or_else(|_| {
            warn!("evaluation point {s:?} is not a number, using 0");
            0.0
        }),
    }
}

fn run_render(args: &[String], config: &Config) -> Result<()> {
    let (a, b, c) = parse_coefficients(args)?;
    let x = parse_eval_point(args.get(3));
    let out_path = args.get(4).map(String::as_str).unwrap_or("plot.ppm");

    let mut pipeline = PlotPipeline::new(config);
    pipeline.set_coefficients(a, b, c);
    pipeline.set_eval_point(x);

    let readouts = pipeline.readouts();
    println!("f(x) = {a}x^2 + {b}x + {c}");
    println!(
        "vertex: ({:.2}, {:.2})",
        readouts.vertex.0, readouts.vertex.1
    );
    println!("axis of symmetry: x = {:.2}", readouts.axis_of_symmetry);
    println!(
        "opens: {}",
        if readouts.opens_upward { "upward" } else { "downward" }
    );
    println!("discriminant: {:.2}", readouts.discriminant);
    println!("roots: {}", readouts.roots_text());
    println!("y-intercept: (0, {:.2})", readouts.y_intercept);
    println!(
        "f({}) = {:.3}",
        readouts.eval_point, readouts.value_at_eval
    );

    let frame = pipeline.render_frame();
    std::fs::write(out_path, frame.to_ppm())
        .with_context(|| format!("failed to write plot to {out_path}"))?;
    info!("wrote {}x{} plot to {out_path}", frame.width(), frame.height());
    Ok(())
}

fn run_export(args: &[String], config: &Config) -> Result<()> {
    let (a, b, c) = parse_coefficients(args)?;
    let out_path = args
        .get(3)
        .map(String::as_str)
        .unwrap_or("quadratic-functions-grade10.html");

    // The snapshot takes the same clamping path as the live pipeline so
    // the artifact's initial values match what the live view would show.
    let mut pipeline = PlotPipeline::new(config);
    pipeline.set_coefficients(a, b, c);

    let snapshot = ExportSnapshot::new(pipeline.coefficients(), QuestionBank::builtin());
    let html = snapshot.to_html(config.canvas.export, &config.theme)?;
    std::fs::write(out_path, html)
        .with_context(|| format!("failed to write artifact to {out_path}"))?;
    info!("wrote standalone artifact to {out_path}");
    Ok(())
}

fn run_quiz() -> Result<()> {
    let mut session = QuizSession::new(QuestionBank::builtin().clone());
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();

    println!("Multiple-Choice Practice — {} questions", session.bank().len());
    print_questions(&session);
    println!("commands: <question> <option>, check, reset, quit");

    for line in stdin.lock().lines() {
        let line = line.context("failed to read from stdin")?;
        let words: Vec<&str> = line.split_whitespace().collect();
        match words.as_slice() {
            [] => {}
            ["quit"] | ["q"] => break,
            ["check"] => {
                session.submit();
                print_feedback(&session);
                println!(
                    "Score: {} / {}",
                    session.score(),
                    session.bank().len()
                );
            }
            ["reset"] => {
                session.reset();
                println!("cleared");
                print_questions(&session);
            }
            [question, option] => {
                match (question.parse::<u32>(), option.parse::<usize>()) {
                    (Ok(id), Ok(opt)) if opt >= 1 => {
                        // Options are presented 1-based; stored 0-based.
                        if let Err(err) = session.select(id, opt - 1) {
                            println!("{err}");
                        }
                    }
                    _ => println!("expected: <question number> <option number>"),
                }
            }
            _ => println!("commands: <question> <option>, check, reset, quit"),
        }
        stdout.flush().ok();
    }
    Ok(())
}

fn print_questions(session: &QuizSession) {
    for q in session.bank().questions() {
        println!("\n{}. {}", q.id, q.prompt);
        for (i, opt) in q.options.iter().enumerate() {
            let marker = if session.selection(q.id) == Some(i) { ">" } else { " " };
            println!("  {marker} {}) {opt}", i + 1);
        }
    }
}

fn print_feedback(session: &QuizSession) {
    for q in session.bank().questions() {
        println!("\n{}. {}", q.id, q.prompt);
        for (i, opt) in q.options.iter().enumerate() {
            let tag = match session.feedback(q.id, i) {
                Some(OptionFeedback::Correct) => "correct",
                Some(OptionFeedback::WrongSelection) => "your pick — wrong",
                _ => "",
            };
            if tag.is_empty() {
                println!("    {}) {opt}", i + 1);
            } else {
                println!("    {}) {opt}  [{tag}]", i + 1);
            }
        }
        if let Some(explanation) = session.explanation(q.id) {
            println!("    {explanation}");
        }
    }
}
