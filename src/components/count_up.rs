use log::{debug, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Element, Window};

use crate::dom::{self, Disposer, PageContext};
use crate::error::Result;

pub const TARGET_ATTR: &str = "data-target";

/// Integer prefix parse with the leniency of JavaScript's `parseInt`:
/// leading whitespace, an optional sign, and trailing junk are accepted,
/// as is a `0x` prefix. The value is an `f64`, so long prefixes lose
/// precision instead of overflowing. `None` stands for NaN.
pub fn parse_target(raw: Option<&str>) -> Option<f64> {
    let s = raw?.trim_start();
    let (negative, s) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let (radix, s) = match s.get(..2) {
        Some("0x") | Some("0X") => (16, &s[2..]),
        _ => (10, s),
    };
    let end = s.find(|c: char| !c.is_digit(radix)).unwrap_or(s.len());
    let digits = &s[..end];
    if digits.is_empty() {
        return None;
    }
    let value = if radix == 10 {
        digits.parse::<f64>().ok()?
    } else {
        digits
            .chars()
            .filter_map(|c| c.to_digit(radix))
            .fold(0.0, |acc, d| acc * f64::from(radix) + f64::from(d))
    };
    Some(if negative { -value } else { value })
}

fn format_count(value: f64) -> String {
    // -0 renders as "0"
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{}", value)
}

pub fn display(target: Option<f64>) -> String {
    match target {
        Some(value) => format_count(value),
        None => "NaN".to_string(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub text: String,
    pub done: bool,
}

/// Linear count from zero toward a target, one step per animation frame.
#[derive(Debug, Clone)]
pub struct CountUp {
    target: Option<f64>,
    current: f64,
    increment: f64,
}

impl CountUp {
    pub fn new(target: Option<f64>, duration_ms: u32, frame_interval_ms: u32) -> Self {
        let frames = f64::from(duration_ms) / f64::from(frame_interval_ms.max(1));
        let increment = match target {
            Some(value) => value / frames,
            None => f64::NAN,
        };
        Self {
            target,
            current: 0.0,
            increment,
        }
    }

    pub fn step(&mut self) -> Frame {
        self.current += self.increment;
        match self.target {
            Some(target) if self.current < target => Frame {
                text: format_count(self.current.ceil()),
                done: false,
            },
            target => Frame {
                text: display(target),
                done: true,
            },
        }
    }
}

fn run(window: Window, element: Element, mut counter: CountUp) {
    let frame = counter.step();
    element.set_text_content(Some(&frame.text));
    if frame.done {
        return;
    }
    let win = window.clone();
    let next = Closure::once_into_js(move || run(win, element, counter));
    if let Err(err) = window.request_animation_frame(next.unchecked_ref()) {
        warn!("count-up: frame request failed: {:?}", err);
    }
}

pub fn mount(ctx: &PageContext) -> Result<Vec<Disposer>> {
    let elements = ctx.query_all(&ctx.config.count_selector)?;
    if elements.is_empty() {
        return Ok(Vec::new());
    }

    let window = ctx.window.clone();
    let reduced_motion = ctx.reduced_motion;
    let duration = ctx.config.count_duration_ms;
    let frame_interval = ctx.config.frame_interval_ms;

    let observer = dom::observe(&elements, ctx.config.count_threshold, None, move |entry, observer| {
        if !entry.is_intersecting() {
            return;
        }
        let element = entry.target();
        observer.unobserve(&element);

        let target = parse_target(element.get_attribute(TARGET_ATTR).as_deref());
        if reduced_motion {
            element.set_text_content(Some(&display(target)));
            return;
        }
        run(window.clone(), element, CountUp::new(target, duration, frame_interval));
    })?;

    debug!("count-up observing {} stats", elements.len());
    Ok(vec![observer])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frames(target: Option<f64>) -> Vec<Frame> {
        let mut counter = CountUp::new(target, 2000, 16);
        let mut out = Vec::new();
        loop {
            let frame = counter.step();
            let done = frame.done;
            out.push(frame);
            if done || out.len() > 1000 {
                return out;
            }
        }
    }

    #[test]
    fn counts_to_exact_target() {
        let frames = frames(Some(150.0));
        let last = frames.last().unwrap();
        assert!(last.done);
        assert_eq!(last.text, "150");
        assert!((125..=127).contains(&frames.len()), "took {} frames", frames.len());
    }

    #[test]
    fn displayed_values_are_rounded_up_and_monotonic() {
        let values: Vec<i64> = frames(Some(150.0)).iter().map(|f| f.text.parse().unwrap()).collect();
        assert_eq!(values[0], 2);
        assert!(values.windows(2).all(|w| w[0] <= w[1]));
        assert!(values.iter().all(|v| *v <= 150));
    }

    #[test]
    fn zero_target_finishes_immediately() {
        let frames = frames(Some(0.0));
        assert_eq!(frames, vec![Frame { text: "0".to_string(), done: true }]);
    }

    #[test]
    fn missing_target_shows_nan() {
        let frames = frames(None);
        assert_eq!(frames, vec![Frame { text: "NaN".to_string(), done: true }]);
    }

    #[test]
    fn reduced_motion_text_is_target() {
        assert_eq!(display(parse_target(Some("150"))), "150");
    }

    #[test]
    fn long_targets_do_not_overflow() {
        assert_eq!(display(parse_target(Some("99999999999999999999"))), "100000000000000000000");
        assert_eq!(display(parse_target(Some("-0"))), "0");
    }

    #[test]
    fn parses_like_parse_int() {
        assert_eq!(parse_target(Some("150")), Some(150.0));
        assert_eq!(parse_target(Some("  42")), Some(42.0));
        assert_eq!(parse_target(Some("98%")), Some(98.0));
        assert_eq!(parse_target(Some("-7")), Some(-7.0));
        assert_eq!(parse_target(Some("0x1A")), Some(26.0));
        assert_eq!(parse_target(Some("12.9")), Some(12.0));
        assert_eq!(parse_target(Some("0x")), None);
        assert_eq!(parse_target(Some("abc")), None);
        assert_eq!(parse_target(Some("")), None);
        assert_eq!(parse_target(None), None);
    }
}
