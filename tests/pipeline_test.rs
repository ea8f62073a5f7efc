use balltrack_rs::integration::TrackRecord;
use balltrack_rs::{
    BallDetector, BallPipeline, Candidate, CsvSink, DetectionSource, Point, ResultSink,
    TrackOutput, TrackerConfig, Trajectory,
};
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_filled_circle_mut;

/// Replays a fixed candidate list, one entry per frame.
struct Replay {
    candidates: std::vec::IntoIter<Candidate>,
}

impl Replay {
    fn new(candidates: Vec<Candidate>) -> Self {
        Self {
            candidates: candidates.into_iter(),
        }
    }
}

impl DetectionSource for Replay {
    type Error = std::convert::Infallible;

    fn detect(&mut self, _input: &[u8], _width: u32, _height: u32) -> Result<Candidate, Self::Error> {
        Ok(self.candidates.next().flatten())
    }
}

fn at(x: i32, y: i32) -> Candidate {
    Some(Point::new(x, y))
}

#[test]
fn test_short_occlusion_to_csv() {
    let detections = vec![
        None,
        None,
        None,
        at(100, 100),
        at(105, 100),
        at(110, 100),
        None,
        at(120, 100),
        at(125, 100),
        at(130, 100),
    ];
    let n = detections.len();
    let mut pipeline = BallPipeline::with_default_config(Replay::new(detections));
    let mut records: Vec<TrackRecord> = Vec::new();
    let mut trajectory = Trajectory::new();

    for _ in 0..n {
        let result = pipeline.process_frame(&[], 320, 240).unwrap();
        records.record(&result).unwrap();
        trajectory.push(&result.output);
    }

    let frames: Vec<u64> = records.iter().map(|r| r.frame).collect();
    assert_eq!(frames, (0..n as u64).collect::<Vec<_>>());

    for r in &records[..5] {
        assert_eq!((r.x, r.y, r.visible), (-1, -1, 0));
    }
    assert_eq!((records[5].x, records[5].y, records[5].visible), (110, 100, 1));
    assert_eq!(records[6].visible, 1);
    assert!((110..=115).contains(&records[6].x));
    for (r, truth) in records[7..].iter().zip([120, 125, 130]) {
        assert_eq!(r.visible, 1);
        assert!((r.x - truth).abs() <= 3);
    }

    // Visible from frame 5 on without interruption.
    assert_eq!(trajectory.len(), 5);
}

#[test]
fn test_trajectory_clears_when_track_is_lost() {
    let mut detections = vec![at(50, 50); 3];
    detections.extend(vec![None; 11]);
    let mut pipeline = BallPipeline::with_default_config(Replay::new(detections));
    let mut trajectory = Trajectory::new();

    for i in 0..14 {
        let result = pipeline.process_frame(&[], 1, 1).unwrap();
        trajectory.push(&result.output);
        if i == 12 {
            assert_eq!(trajectory.len(), 11);
        }
    }
    assert!(trajectory.is_empty());
    assert_eq!(pipeline.tracker().missed_frames(), 11);
}

#[test]
fn test_csv_header_and_sentinel_rows() {
    let mut pipeline = BallPipeline::new(
        Replay::new(vec![at(7, 8), at(7, 8)]),
        TrackerConfig {
            init_threshold: 2,
            ..Default::default()
        },
    )
    .unwrap();
    let mut sink = CsvSink::from_writer(Vec::new());
    for _ in 0..3 {
        let result = pipeline.process_frame(&[], 1, 1).unwrap();
        sink.record(&result).unwrap();
    }
    sink.finish().unwrap();

    let text = String::from_utf8(sink.into_inner().unwrap()).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines, vec!["frame,x,y,visible", "0,-1,-1,0", "1,7,8,1", "2,7,8,1"]);
}

#[test]
fn test_detector_and_tracker_on_synthetic_clip() {
    let grass = Rgb([40, 110, 50]);
    let white = Rgb([245, 245, 240]);
    let truth = |frame: i32| (30 + 15 * (frame - 3), 70);

    let mut pipeline = BallPipeline::with_default_config(BallDetector::default());
    let mut outputs: Vec<TrackOutput> = Vec::new();

    for frame in 0..12 {
        let mut image = RgbImage::from_pixel(200, 150, grass);
        if frame >= 3 {
            draw_filled_circle_mut(&mut image, truth(frame), 5, white);
        }
        let result = pipeline.process_image(&image).unwrap();
        if frame >= 3 {
            let c = result.candidate.expect("ball should be detected");
            let (tx, ty) = truth(frame);
            assert!((c.x - tx).abs() <= 1 && (c.y - ty).abs() <= 1);
        } else {
            assert_eq!(result.candidate, None);
        }
        outputs.push(result.output);
    }

    for out in &outputs[..5] {
        assert!(!out.visible);
    }
    for (i, out) in outputs.iter().enumerate().skip(5) {
        let (tx, ty) = truth(i as i32);
        assert!(out.visible, "frame {i} should be visible");
        assert!((out.x - tx).abs() <= 8, "frame {i}: {} vs {tx}", out.x);
        assert!((out.y - ty).abs() <= 1);
    }
}
