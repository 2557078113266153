use serde::Deserialize;
use vizij_interpolation_core::{
    Animator, Config, Interpolator, Linear, ManualClock, TimingCurve, Value,
};
use vizij_test_fixtures::{keyframes, runs};

#[derive(Debug, Deserialize)]
struct Sample {
    progress: f64,
    expected: Value,
}

#[derive(Debug, Deserialize)]
struct KeyframeFixture {
    keyframes: Vec<Value>,
    #[serde(default)]
    timing: TimingCurve,
    samples: Vec<Sample>,
}

#[derive(Debug, Deserialize)]
struct RunFixture {
    keyframes: Vec<Value>,
    #[serde(default)]
    config: Config,
    frame_interval: f64,
    start: f64,
    target: f64,
    duration: f64,
    expected_ticks: usize,
    expected_final: Value,
}

fn assert_close(name: &str, actual: &Value, expected: &Value) {
    assert_eq!(actual.kind(), expected.kind(), "{name}: kind");
    for (i, (a, e)) in actual
        .components()
        .iter()
        .zip(expected.components())
        .enumerate()
    {
        assert!(
            (a - e).abs() <= 1e-9,
            "{name}: component {i} left={a} right={e}"
        );
    }
}

/// it should reproduce every sample in the keyframe fixtures
#[test]
fn keyframe_fixtures_match_samples() {
    let names = keyframes::keys();
    assert!(!names.is_empty());
    for name in names {
        let fixture: KeyframeFixture = keyframes::load(&name).expect("load fixture");
        let mut interp =
            Interpolator::new(&fixture.keyframes, fixture.timing, |_| {}).expect("build");
        for sample in &fixture.samples {
            interp.set_progress(sample.progress).expect("update");
            let actual = interp.value().expect("devectorize");
            assert_close(
                &format!("{name}@{}", sample.progress),
                &actual,
                &sample.expected,
            );
        }
    }
}

#[test]
fn run_fixtures_finish_on_schedule() {
    for name in runs::keys() {
        let fixture: RunFixture = runs::load(&name).expect("load fixture");
        let clock = ManualClock::with_frame_interval(fixture.frame_interval);
        let engine = Interpolator::new(&fixture.keyframes, Linear, |_| {})
            .expect("build")
            .with_config(fixture.config);
        let anim = Animator::new(engine, clock.clone());
        anim.set_progress(fixture.start).unwrap();
        anim.animate(fixture.target, fixture.duration, |r| assert!(r.is_ok()))
            .expect("start");

        let ticks = clock.run_frames(10_000);
        assert_eq!(ticks, fixture.expected_ticks, "{name}: ticks");
        assert_eq!(anim.progress(), fixture.target, "{name}: progress");
        assert_close(&name, &anim.value().unwrap(), &fixture.expected_final);
    }
}

#[test]
fn fixture_json_is_readable() {
    let text = keyframes::json("scalar-peak").expect("read");
    assert!(text.contains("\"samples\""));
}
