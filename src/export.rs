// src/export.rs

//! Export serializer: produces the standalone HTML artifact.
//!
//! The artifact embeds its own style rules, its own canvas/quiz script,
//! and a value-copy of the current coefficients and question bank. It has
//! no external references and no dependency on this process at view time.
//!
//! The embedded script is the second implementation of the math engine,
//! view window, coordinate mapper, renderer, and quiz engine. To keep the
//! two implementations from drifting, every tunable the Rust side owns —
//! sampling half-span, paddings, marker radius, label offsets, the theme
//! palette, root labels — is injected into the script from the same
//! constants the live renderer uses. The algorithms themselves (formula
//! order of the roots, layer order, one curve sample per pixel column)
//! are mirrored statement for statement.

use crate::color::Theme;
use crate::mapper::CanvasSize;
use crate::math::Coefficients;
use crate::quiz::QuestionBank;
use crate::scene::{LABEL_DX, LABEL_DY, MARKER_RADIUS};
use crate::view::{PAD_X, PAD_Y, SAMPLE_HALF_SPAN};

use log::info;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to serialize question bank")]
    Serialize(#[from] serde_json::Error),
}

/// A value-copy of everything the artifact needs, taken at the moment of
/// export. Consumed once; it has no further lifecycle.
#[derive(Debug, Clone)]
pub struct ExportSnapshot {
    coefficients: Coefficients,
    bank: QuestionBank,
}

impl ExportSnapshot {
    pub fn new(coefficients: Coefficients, bank: &QuestionBank) -> Self {
        Self { coefficients, bank: bank.clone() }
    }

    /// Renders the complete standalone document.
    pub fn to_html(&self, canvas: CanvasSize, theme: &Theme) -> Result<String, ExportError> {
        let questions_json = serde_json::to_string(&self.bank)?;
        info!(
            "building export artifact: {} questions, canvas {}x{}",
            self.bank.len(),
            canvas.width,
            canvas.height
        );

        let script = SCRIPT_TEMPLATE
            .replace("@A@", &self.coefficients.a.to_string())
            .replace("@B@", &self.coefficients.b.to_string())
            .replace("@C@", &self.coefficients.c.to_string())
            .replace("@QUESTIONS@", &questions_json)
            .replace("@WIDTH@", &canvas.width.to_string())
            .replace("@HALF_SPAN@", &SAMPLE_HALF_SPAN.to_string())
            .replace("@PAD_X@", &PAD_X.to_string())
            .replace("@PAD_Y@", &PAD_Y.to_string())
            .replace("@MARKER_R@", &MARKER_RADIUS.to_string())
            .replace("@LABEL_DX@", &LABEL_DX.to_string())
            .replace("@LABEL_DY@", &LABEL_DY.to_string())
            .replace("@GRID@", &theme.grid.to_css_hex())
            .replace("@AXES@", &theme.axes.to_css_hex())
            .replace("@CURVE@", &theme.curve.to_css_hex())
            .replace("@VERTEX@", &theme.vertex.to_css_hex())
            .replace("@ROOT@", &theme.root.to_css_hex())
            .replace("@INTERCEPT@", &theme.intercept.to_css_hex())
            .replace("@LABEL@", &theme.label.to_css_hex())
            .replace("@BG@", &theme.background.to_css_hex());

        let document = DOCUMENT_TEMPLATE
            .replace("@STYLE@", STYLE)
            .replace("@SCRIPT@", &script)
            .replace("@WIDTH@", &canvas.width.to_string())
            .replace("@HEIGHT@", &canvas.height.to_string())
            .replace("@A_INIT@", &format!("{:.1}", self.coefficients.a))
            .replace("@B_INIT@", &format!("{:.1}", self.coefficients.b))
            .replace("@C_INIT@", &format!("{:.1}", self.coefficients.c));

        Ok(document)
    }
}

const STYLE: &str = "*{box-sizing:border-box}\
body{font-family:system-ui,Segoe UI,Roboto,Helvetica,Arial,sans-serif;margin:0;\
color:#111827;background:linear-gradient(to bottom,#eef2ff,#ffffff,#eff6ff)}\
.container{max-width:1024px;margin:0 auto;padding:24px}\
.card{background:#fff;border:1px solid #e5e7eb;border-radius:16px;\
box-shadow:0 4px 16px rgba(0,0,0,.06);padding:16px}\
.btn{background:#4f46e5;color:#fff;border:none;border-radius:8px;\
padding:10px 14px;cursor:pointer}.btn:hover{background:#4338ca}\
.row{display:grid;gap:16px}.grid-2{grid-template-columns:1fr 1fr}\
.grid-3{grid-template-columns:repeat(3,1fr)}\
label{font-weight:600;font-size:14px}input[type=range]{width:100%}\
.badge{display:inline-block;padding:4px 8px;border-radius:8px;\
background:#eef2ff;color:#3730a3;font-weight:600}";

// The embedded engine. Tokens marked @...@ are filled from the Rust-side
// constants; everything else mirrors the live pipeline's algorithms.
const SCRIPT_TEMPLATE: &str = r#"(() => {
const state = { a: @A@, b: @B@, c: @C@, answers: {}, submitted: false };
const HALF_SPAN = @HALF_SPAN@, PAD_X = @PAD_X@, PAD_Y = @PAD_Y@;
const MARKER_R = @MARKER_R@, LABEL_DX = @LABEL_DX@, LABEL_DY = @LABEL_DY@;
const $ = (s) => document.querySelector(s);
const $$ = (s) => Array.from(document.querySelectorAll(s));
const canvas = $('#graph');
const ctx = canvas.getContext('2d');

// Math engine: discriminant, vertex, roots in formula order (x1 first).
const geometry = () => {
  const { a, b, c } = state;
  const D = b * b - 4 * a * c;
  const xv = -b / (2 * a);
  const yv = a * xv * xv + b * xv + c;
  let roots = [];
  if (D > 0) {
    const s = Math.sqrt(D);
    roots = [(-b - s) / (2 * a), (-b + s) / (2 * a)];
  } else if (D === 0) {
    roots = [-b / (2 * a)];
  }
  return { D, xv, yv, roots };
};

const draw = () => {
  const W = canvas.width, H = canvas.height;
  const { a, b, c } = state;
  const g = geometry();

  // View window: sample 2*HALF_SPAN+1 integer offsets around the vertex,
  // pad by PAD_X / PAD_Y, fold the y-intercept into the Y range.
  let minSX = g.xv - HALF_SPAN, maxSX = g.xv + HALF_SPAN;
  let minSY = Infinity, maxSY = -Infinity;
  for (let i = -HALF_SPAN; i <= HALF_SPAN; i++) {
    const x = g.xv + i;
    const y = a * x * x + b * x + c;
    minSX = Math.min(minSX, x); maxSX = Math.max(maxSX, x);
    minSY = Math.min(minSY, y); maxSY = Math.max(maxSY, y);
  }
  const minX = minSX - PAD_X, maxX = maxSX + PAD_X;
  const minY = Math.min(minSY, c) - PAD_Y, maxY = Math.max(maxSY, c) + PAD_Y;

  // Coordinate mapper, Y flipped.
  const sx = (x) => ((x - minX) / (maxX - minX)) * W;
  const sy = (y) => H - ((y - minY) / (maxY - minY)) * H;

  // Layer 1: background.
  ctx.clearRect(0, 0, W, H);
  ctx.fillStyle = '@BG@';
  ctx.fillRect(0, 0, W, H);

  // Layer 2: integer grid.
  ctx.strokeStyle = '@GRID@';
  ctx.lineWidth = 1;
  ctx.beginPath();
  for (let gx = Math.ceil(minX); gx <= Math.floor(maxX); gx++) {
    const x = sx(gx); ctx.moveTo(x, 0); ctx.lineTo(x, H);
  }
  for (let gy = Math.ceil(minY); gy <= Math.floor(maxY); gy++) {
    const y = sy(gy); ctx.moveTo(0, y); ctx.lineTo(W, y);
  }
  ctx.stroke();

  // Layer 3: axes at math zero.
  ctx.strokeStyle = '@AXES@';
  ctx.lineWidth = 2;
  ctx.beginPath();
  const yAxisX = sx(0); ctx.moveTo(yAxisX, 0); ctx.lineTo(yAxisX, H);
  const xAxisY = sy(0); ctx.moveTo(0, xAxisY); ctx.lineTo(W, xAxisY);
  ctx.stroke();

  // Layer 4: the curve, one sample per pixel column.
  ctx.strokeStyle = '@CURVE@';
  ctx.lineWidth = 3;
  ctx.beginPath();
  let first = true;
  for (let i = 0; i <= W; i++) {
    const x = minX + (i / W) * (maxX - minX);
    const y = a * x * x + b * x + c;
    if (first) { ctx.moveTo(sx(x), sy(y)); first = false; }
    else { ctx.lineTo(sx(x), sy(y)); }
  }
  ctx.stroke();

  // Layer 5: annotated points, drawn last.
  const point = (x, y, color, label) => {
    ctx.fillStyle = color;
    ctx.beginPath();
    ctx.arc(sx(x), sy(y), MARKER_R, 0, Math.PI * 2);
    ctx.fill();
    ctx.fillStyle = '@LABEL@';
    ctx.font = '12px system-ui, sans-serif';
    ctx.fillText(label, sx(x) + LABEL_DX, sy(y) + LABEL_DY);
  };
  point(g.xv, g.yv, '@VERTEX@', 'Vertex');
  g.roots.forEach((r, i) => point(r, 0, '@ROOT@', i === 0 ? 'x₁' : 'x₂'));
  point(0, c, '@INTERCEPT@', 'y-intercept');

  // Readout panel.
  $('#vertex').textContent = '(' + g.xv.toFixed(2) + ', ' + g.yv.toFixed(2) + ')';
  $('#axis').textContent = g.xv.toFixed(2);
  $('#opens').textContent = state.a > 0 ? 'Upward' : 'Downward';
  $('#disc').textContent = g.D.toFixed(2);
  $('#roots').textContent =
    g.roots.length ? g.roots.map((r) => r.toFixed(2)).join(', ') : 'None (complex)';
  $('#yint').textContent = state.c.toFixed(2);
};

['a', 'b', 'c'].forEach((k) => {
  const el = $('#' + k);
  el.value = state[k];
  el.addEventListener('input', (e) => {
    state[k] = parseFloat(e.target.value);
    $('#val_' + k).textContent = Number(state[k]).toFixed(1);
    draw();
  });
});

// Quiz engine over the embedded bank.
const bank = @QUESTIONS@;
const list = $('#q-list');
bank.forEach((q, qi) => {
  const li = document.createElement('li');
  li.style.marginBottom = '12px';
  const title = document.createElement('div');
  title.style.fontWeight = '600';
  title.textContent = (qi + 1) + '. ' + q.prompt;
  li.appendChild(title);
  const grid = document.createElement('div');
  grid.style.display = 'grid';
  grid.style.gridTemplateColumns = '1fr 1fr';
  grid.style.gap = '8px';
  q.options.forEach((opt, i) => {
    const label = document.createElement('label');
    label.style.display = 'flex';
    label.style.alignItems = 'center';
    label.style.gap = '8px';
    label.style.border = '1px solid #e5e7eb';
    label.style.borderRadius = '8px';
    label.style.padding = '8px';
    const input = document.createElement('input');
    input.type = 'radio';
    input.name = 'q_' + q.id;
    input.addEventListener('change', () => { state.answers[q.id] = i; });
    label.appendChild(input);
    label.appendChild(document.createTextNode(opt));
    grid.appendChild(label);
  });
  li.appendChild(grid);
  const exp = document.createElement('div');
  exp.className = 'explain';
  exp.style.marginTop = '6px';
  exp.style.fontSize = '14px';
  li.appendChild(exp);
  list.appendChild(li);
});

$('#check').addEventListener('click', () => {
  state.submitted = true;
  $$('.explain').forEach((exp, idx) => {
    const q = bank[idx];
    if (state.answers[q.id] === q.correct) {
      exp.style.color = '#065f46';
      exp.textContent = 'Correct! ' + q.explanation;
    } else {
      exp.style.color = '#7f1d1d';
      exp.textContent = 'Not quite. ' + q.explanation;
    }
  });
  const score = bank.reduce(
    (acc, q) => acc + (state.answers[q.id] === q.correct ? 1 : 0), 0);
  $('#score').textContent = 'Score: ' + score + ' / ' + bank.length;
});

$('#reset').addEventListener('click', () => {
  state.answers = {};
  state.submitted = false;
  $('#score').textContent = '';
  $$('input[type=radio]').forEach((i) => { i.checked = false; });
  $$('.explain').forEach((e) => { e.textContent = ''; });
});

draw();
})();"#;

const DOCUMENT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en"><head><meta charset="UTF-8"/>
<meta name="viewport" content="width=device-width, initial-scale=1"/>
<title>Quadratic Functions • Grade 10</title>
<style>@STYLE@</style></head><body>
<header style="position:sticky;top:0;background:#ffffffaa;backdrop-filter:blur(8px);border-bottom:1px solid #e5e7eb">
<div class="container" style="display:flex;justify-content:space-between;align-items:center;padding:14px 24px">
<h1 style="color:#4338ca;margin:0;font-size:22px;font-weight:800">Quadratic Functions • Grade 10</h1>
<span class="badge">Standalone HTML</span></div></header>
<main class="container">
<div class="row grid-2" style="align-items:start;margin-top:16px">
<section><h2 style="font-size:22px;margin:0 0 8px 0">Overview</h2>
<p>A quadratic function is any function that can be written in the form y = ax^2 + bx + c
where a, b, and c are real numbers and a ≠ 0. Its graph is a U-shaped curve called a parabola.</p>
<ul><li>Opens up if a &gt; 0; opens down if a &lt; 0.</li>
<li>Axis of symmetry is x = -b/(2a).</li>
<li>Vertex: in standard form, x = -b/(2a), y = f(x).</li>
<li>Intercepts: y-intercept at (0, c); x-intercepts depend on the discriminant D = b^2 - 4ac.</li></ul>
</section>
<section class="card"><h3 style="margin:0 0 8px 0">Interactive Parabola</h3>
<div class="row grid-3">
<label>a<input id="a" type="range" min="-5" max="5" step="0.1"/>
<div style="font-size:12px;color:#4b5563">Value: <span id="val_a">@A_INIT@</span></div></label>
<label>b<input id="b" type="range" min="-10" max="10" step="0.1"/>
<div style="font-size:12px;color:#4b5563">Value: <span id="val_b">@B_INIT@</span></div></label>
<label>c<input id="c" type="range" min="-10" max="10" step="0.1"/>
<div style="font-size:12px;color:#4b5563">Value: <span id="val_c">@C_INIT@</span></div></label>
</div>
<canvas id="graph" width="@WIDTH@" height="@HEIGHT@" style="width:100%;border:1px solid #e5e7eb;border-radius:8px"></canvas>
<div class="row grid-2">
<div class="card" style="background:#eef2ff">
<div><b>Vertex:</b> <span id="vertex"></span></div>
<div><b>Axis:</b> x = <span id="axis"></span></div>
<div><b>Opens:</b> <span id="opens"></span></div></div>
<div class="card" style="background:#ecfdf5">
<div><b>Discriminant:</b> <span id="disc"></span></div>
<div><b>Roots:</b> <span id="roots"></span></div>
<div><b>y-intercept:</b> (0, <span id="yint"></span>)</div></div>
</div></section></div>
<section class="card" style="margin-top:16px">
<h2 style="margin:0 0 8px 0">Multiple-Choice Practice</h2>
<ol id="q-list" style="padding-left:18px"></ol>
<div style="display:flex;gap:8px;align-items:center">
<button id="check" class="btn">Check Answers</button>
<button id="reset" class="btn" style="background:#e5e7eb;color:#111827">Reset</button>
<div id="score" style="margin-left:auto;font-weight:700"></div></div>
</section></main>
<footer style="text-align:center;color:#6b7280;font-size:12px;padding:24px">Quadratic Functions Study Pack</footer>
<script>@SCRIPT@</script></body></html>"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::QuestionBank;

    fn artifact_for(a: f64, b: f64, c: f64) -> String {
        let snapshot = ExportSnapshot::new(Coefficients::new(a, b, c), QuestionBank::builtin());
        snapshot
            .to_html(CanvasSize::new(800, 360), &Theme::default())
            .unwrap()
    }

    #[test]
    fn artifact_is_self_contained() {
        // Contract: no external references of any kind; the document must
        // be viewable offline.
        let html = artifact_for(1.0, 0.0, 0.0);
        assert!(!html.contains("http://"));
        assert!(!html.contains("https://"));
        assert!(!html.contains("src=\"/"));
        assert!(!html.contains("href="));
        assert!(html.contains("<style>"));
        assert!(html.contains("<script>"));
    }

    #[test]
    fn artifact_embeds_snapshot_coefficients() {
        let html = artifact_for(2.0, -8.0, 6.0);
        assert!(html.contains("a: 2, b: -8, c: 6"));
        // Initial slider value displays use one decimal place.
        assert!(html.contains(">2.0</span>"));
        assert!(html.contains(">-8.0</span>"));
    }

    #[test]
    fn artifact_embeds_the_full_question_bank() {
        let html = artifact_for(1.0, 0.0, 0.0);
        let bank_json = serde_json::to_string(QuestionBank::builtin()).unwrap();
        assert!(html.contains(&bank_json));
        for q in QuestionBank::builtin().questions() {
            assert!(html.contains(&q.prompt));
        }
    }

    #[test]
    fn artifact_shares_layout_constants_with_live_renderer() {
        // Contract: the script's view-window and marker constants come
        // from the same Rust constants the live pipeline uses.
        let html = artifact_for(1.0, 0.0, 0.0);
        assert!(html.contains("const HALF_SPAN = 5, PAD_X = 1, PAD_Y = 2;"));
        assert!(html.contains("const MARKER_R = 4, LABEL_DX = 6, LABEL_DY = -6;"));
        assert!(html.contains("width=\"800\" height=\"360\""));
    }

    #[test]
    fn artifact_uses_theme_palette() {
        let html = artifact_for(1.0, 0.0, 0.0);
        let theme = Theme::default();
        for color in [theme.curve, theme.vertex, theme.root, theme.intercept, theme.grid] {
            assert!(html.contains(&color.to_css_hex()));
        }
    }

    #[test]
    fn artifact_preserves_root_order_and_labels() {
        // Contract: formula order (−b−√D)/2a first, x₁ label on the first.
        let html = artifact_for(1.0, 0.0, 0.0);
        assert!(html.contains("roots = [(-b - s) / (2 * a), (-b + s) / (2 * a)]"));
        assert!(html.contains("i === 0 ? 'x₁' : 'x₂'"));
    }

    #[test]
    fn no_template_tokens_survive_rendering() {
        // Contract: every @TOKEN@ placeholder is replaced.
        let html = artifact_for(-1.5, 0.3, 9.9);
        for token in [
            "@A@", "@B@", "@C@", "@QUESTIONS@", "@WIDTH@", "@HEIGHT@", "@HALF_SPAN@",
            "@PAD_X@", "@PAD_Y@", "@MARKER_R@", "@LABEL_DX@", "@LABEL_DY@", "@BG@",
            "@GRID@", "@AXES@", "@CURVE@", "@VERTEX@", "@ROOT@", "@INTERCEPT@",
            "@LABEL@", "@STYLE@", "@SCRIPT@", "@A_INIT@", "@B_INIT@", "@C_INIT@",
        ] {
            assert!(!html.contains(token), "unreplaced token {token}");
        }
    }
}
