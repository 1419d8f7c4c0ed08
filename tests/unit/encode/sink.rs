use super::*;

fn cfg() -> SinkConfig {
    SinkConfig {
        width: 2,
        height: 2,
        fps: 30,
    }
}

#[test]
fn config_validation() {
    assert!(cfg().validate().is_ok());
    assert!(SinkConfig { fps: 0, ..cfg() }.validate().is_err());
    assert!(SinkConfig { width: 0, ..cfg() }.validate().is_err());
}

#[test]
fn in_memory_sink_rejects_mismatched_frames() {
    let mut sink = InMemorySink::new();
    sink.begin(cfg()).unwrap();
    let err = sink.present(&PixelBuffer::new(3, 2).unwrap()).unwrap_err();
    assert!(err.to_string().contains("mismatch"));
    sink.present(&PixelBuffer::new(2, 2).unwrap()).unwrap();
    assert_eq!(sink.presented(), 1);
}

#[test]
fn keep_last_drops_the_oldest_frames() {
    let mut sink = InMemorySink::keep_last(2);
    sink.begin(cfg()).unwrap();
    for level in [1u8, 2, 3] {
        sink.present(&PixelBuffer::filled(2, 2, [level, 0, 0]).unwrap())
            .unwrap();
    }
    assert_eq!(sink.presented(), 3);
    assert_eq!(sink.frames().len(), 2);
    assert_eq!(sink.frames()[0].get_pixel(0, 0), [2, 0, 0, 255]);
    assert_eq!(sink.last().unwrap().get_pixel(0, 0), [3, 0, 0, 255]);
    sink.end().unwrap();
    assert!(sink.ended());
}

#[test]
fn keep_last_holds_a_sliding_window_over_long_runs() {
    let mut sink = InMemorySink::keep_last(3);
    sink.begin(cfg()).unwrap();
    for level in 0..100u8 {
        sink.present(&PixelBuffer::filled(2, 2, [level, 0, 0]).unwrap())
            .unwrap();
    }
    let reds: Vec<u8> = sink.frames().iter().map(|f| f.get_pixel(0, 0)[0]).collect();
    assert_eq!(reds, vec![97, 98, 99]);
    assert_eq!(sink.presented(), 100);
}
