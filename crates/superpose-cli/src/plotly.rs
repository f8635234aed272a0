//! Standalone Plotly HTML export of the polarised 1D animation.
//!
//! The figure is assembled as JSON with `serde_json` and embedded in a page
//! that loads plotly.js from its CDN. Every frame carries the same number of
//! traces (tip trace, one arrow per mode, total arrow) so Plotly can
//! interpolate between them. Frames are named by index because Plotly
//! merges frames that share a name; the slider shows the time label.

use std::path::Path;

use anyhow::Result;
use serde_json::{json, Value};

use superpose_core::animation::{mode_colour, Arrow, Frame, PolarisedAnimation, TOTAL_COLOUR};

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";
const FRAME_DURATION_MS: u32 = 60;

fn arrow_trace(arrow: &Arrow, colour: &str) -> Value {
    json!({
        "type": "scatter3d",
        "mode": "lines",
        "x": [arrow.tail[0], arrow.head[0]],
        "y": [arrow.tail[1], arrow.head[1]],
        "z": [arrow.tail[2], arrow.head[2]],
        "line": { "color": colour, "width": 4 },
        "showlegend": false,
    })
}

fn frame_traces(frame: &Frame) -> Vec<Value> {
    let mut traces = Vec::with_capacity(frame.mode_arrows.len() + 2);
    if let Some(points) = &frame.trace {
        traces.push(json!({
            "type": "scatter3d",
            "mode": "lines",
            "x": points.iter().map(|p| p[0]).collect::<Vec<_>>(),
            "y": points.iter().map(|p| p[1]).collect::<Vec<_>>(),
            "z": points.iter().map(|p| p[2]).collect::<Vec<_>>(),
            "line": { "color": "blue", "width": 3 },
            "name": "Field tip trace",
            "showlegend": false,
        }));
    }
    for (i, arrow) in frame.mode_arrows.iter().enumerate() {
        traces.push(arrow_trace(arrow, mode_colour(i).0));
    }
    traces.push(arrow_trace(&frame.total_arrow, TOTAL_COLOUR.0));
    traces
}

fn play_pause_buttons() -> Value {
    json!([{
        "type": "buttons",
        "buttons": [
            {
                "label": "Play",
                "method": "animate",
                "args": [null, {
                    "frame": { "duration": FRAME_DURATION_MS, "redraw": true },
                    "fromcurrent": true,
                }],
            },
            {
                "label": "Pause",
                "method": "animate",
                "args": [[null], {
                    "frame": { "duration": 0, "redraw": false },
                    "mode": "immediate",
                }],
            },
        ],
        "direction": "left",
        "pad": { "r": 10, "t": 87 },
        "showactive": false,
        "x": 0.1,
        "xanchor": "right",
        "y": 0,
        "yanchor": "top",
    }])
}

/// Build the full Plotly figure (data, layout, frames).
pub fn figure(anim: &PolarisedAnimation) -> Value {
    let frames: Vec<Value> = anim
        .frames
        .iter()
        .enumerate()
        .map(|(i, f)| json!({ "name": i.to_string(), "data": frame_traces(f) }))
        .collect();

    let steps: Vec<Value> = anim
        .frames
        .iter()
        .enumerate()
        .map(|(i, f)| {
            json!({
                "args": [[i.to_string()], {
                    "frame": { "duration": 0, "redraw": true },
                    "mode": "immediate",
                }],
                "label": f.label,
                "method": "animate",
            })
        })
        .collect();

    let axis = |title: &str, range: [f64; 2]| {
        json!({ "title": title, "range": range, "color": "white", "autorange": false })
    };
    let b = &anim.bounds;

    json!({
        "data": anim.frames.first().map(frame_traces).unwrap_or_default(),
        "frames": frames,
        "layout": {
            "scene": {
                "xaxis": axis("x", b.x),
                "yaxis": axis("Re[E(x,t)]", b.y),
                "zaxis": axis("Field vector", b.z),
                "bgcolor": "rgb(20,20,30)",
                "aspectmode": "cube",
            },
            "title": "1D Electric Field Vectors (animated)",
            "margin": { "l": 0, "r": 0, "b": 0, "t": 40 },
            "showlegend": false,
            "paper_bgcolor": "rgb(10,10,15)",
            "font": { "color": "white" },
            "updatemenus": play_pause_buttons(),
            "sliders": [{
                "steps": steps,
                "transition": { "duration": 0 },
                "x": 0.1,
                "len": 0.9,
                "currentvalue": { "prefix": "t = " },
            }],
        },
    })
}

/// Render the figure into a self-contained HTML page.
pub fn render_html(anim: &PolarisedAnimation) -> Result<String> {
    let fig = serde_json::to_string(&figure(anim))
        .map_err(|e| anyhow::anyhow!("JSON serialisation error: {}", e))?;
    Ok(format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Superpose: polarised field</title>
<script src="{PLOTLY_CDN}"></script>
<style>html, body, #plot {{ margin: 0; width: 100%; height: 100%; background: rgb(10,10,15); }}</style>
</head>
<body>
<div id="plot"></div>
<script>
const fig = {fig};
Plotly.newPlot("plot", fig.data, fig.layout).then(function () {{
  Plotly.addFrames("plot", fig.frames);
}});
</script>
</body>
</html>
"#
    ))
}

/// Write the animation to a standalone HTML file.
pub fn write_html(anim: &PolarisedAnimation, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, render_html(anim)?)?;
    println!("Animation written to: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use superpose_core::animation::{AnimationSettings, TraceMode};
    use std::collections::HashSet;
    use superpose_core::grid::Grid1d;
    use superpose_core::timing::TimeSpan;
    use superpose_core::types::{Mode1d, Polarisation};
    use num_complex::Complex64;

    fn anim(trace: TraceMode) -> PolarisedAnimation {
        anim_with(AnimationSettings { frames: 4, trace, ..Default::default() })
    }

    fn anim_with(settings: AnimationSettings) -> PolarisedAnimation {
        let modes = [
            Mode1d::new(1.0, Polarisation::first(), Complex64::new(1.0, 0.0)),
            Mode1d::new(-1.0, Polarisation::first(), Complex64::new(1.0, 0.0)),
        ];
        let grid = Grid1d::new(0.0, 1.0, 5).unwrap();
        PolarisedAnimation::build(&modes, &grid, &settings).unwrap()
    }

    #[test]
    fn test_frames_named_by_index() {
        let fig = figure(&anim(TraceMode::Full));
        let frames = fig["frames"].as_array().unwrap();
        assert_eq!(frames.len(), 4);
        assert_eq!(frames[0]["name"], "0");
        assert_eq!(frames[3]["name"], "3");
        // Trace + two mode arrows + total arrow.
        assert_eq!(frames[2]["data"].as_array().unwrap().len(), 4);
        assert_eq!(fig["data"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn test_probe_only_omits_trace() {
        let fig = figure(&anim(TraceMode::ProbeOnly));
        let data = fig["data"].as_array().unwrap();
        assert_eq!(data.len(), 3);
        assert_eq!(data[0]["line"]["color"], "red");
        assert_eq!(data[2]["line"]["color"], "magenta");
    }

    #[test]
    fn test_slider_steps_match_frames() {
        let fig = figure(&anim(TraceMode::Full));
        let steps = fig["layout"]["sliders"][0]["steps"].as_array().unwrap();
        assert_eq!(steps.len(), 4);
        let a = anim(TraceMode::Full);
        assert_eq!(steps[3]["label"], a.frames[3].label.as_str());
        assert_eq!(steps[3]["args"][0][0], "3");
        assert_eq!(fig["layout"]["scene"]["yaxis"]["range"][1], 4.0);
    }

    #[test]
    fn test_html_embeds_figure() {
        let html = render_html(&anim(TraceMode::Full)).unwrap();
        assert!(html.contains(PLOTLY_CDN));
        assert!(html.contains("Plotly.addFrames"));
        assert!(html.contains("\"name\":\"0\""));
    }

    #[test]
    fn test_frame_names_unique_for_short_span() {
        // 100 frames over 0.3 time units round to duplicate two-decimal labels.
        let settings = AnimationSettings {
            frames: 100,
            span: TimeSpan::Fixed { start: 0.0, end: 0.3 },
            ..Default::default()
        };
        let fig = figure(&anim_with(settings));
        let frames = fig["frames"].as_array().unwrap();
        let names: HashSet<&str> = frames.iter().map(|f| f["name"].as_str().unwrap()).collect();
        assert_eq!(names.len(), 100);
        let steps = fig["layout"]["sliders"][0]["steps"].as_array().unwrap();
        assert_eq!(steps.len(), 100);
        for (step, frame) in steps.iter().zip(frames) {
            assert_eq!(step["args"][0][0], frame["name"]);
        }
    }
}
