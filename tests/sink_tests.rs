use evobench::sweep::{ResultSink, LOG_HEADER};
use regex::Regex;
use std::fs;
use std::thread;

#[test]
fn header_then_appends() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("log.csv");
    let sink = ResultSink::new(&path);

    sink.write_header(LOG_HEADER).unwrap();
    sink.append("1/1,10,50,0.8,0.9,0.2,0.2,0.5,0.5,0:00:00.100").unwrap();
    sink.append("1/1,20,50,0.8,0.9,0.2,0.2,0.6,0.4,0:00:00.200").unwrap();

    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], LOG_HEADER);
}

#[test]
fn rewriting_the_header_resets_the_log() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("log.csv");
    let sink = ResultSink::new(&path);

    sink.write_header(LOG_HEADER).unwrap();
    sink.append("stale line").unwrap();
    sink.write_header(LOG_HEADER).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content, format!("{}\n", LOG_HEADER));
}

#[test]
fn concurrent_writers_never_interleave_lines() {
    const WRITERS: usize = 8;
    const LINES_EACH: usize = 25;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("log.csv");
    let sink = ResultSink::new(&path);
    sink.write_header(LOG_HEADER).unwrap();

    thread::scope(|scope| {
        for w in 0..WRITERS {
            let sink = &sink;
            scope.spawn(move || {
                for i in 0..LINES_EACH {
                    let line = format!("writer={} line={} payload=0123456789", w, i);
                    sink.append(&line).unwrap();
                }
            });
        }
    });

    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 1 + WRITERS * LINES_EACH);
    assert_eq!(lines[0], LOG_HEADER);

    let shape = Regex::new(r"^writer=(\d+) line=(\d+) payload=0123456789$").unwrap();
    let mut counts = vec![0usize; WRITERS];
    for line in &lines[1..] {
        let caps = shape.captures(line).expect("no partial or merged lines");
        let w: usize = caps[1].parse().unwrap();
        counts[w] += 1;
    }
    assert!(counts.iter().all(|&c| c == LINES_EACH));
}

#[test]
fn appends_within_one_writer_keep_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("log.csv");
    let sink = ResultSink::new(&path);
    sink.write_header(LOG_HEADER).unwrap();

    for i in 0..10 {
        sink.append(&format!("seq={}", i)).unwrap();
    }

    let content = fs::read_to_string(&path).unwrap();
    let data: Vec<&str> = content.lines().skip(1).collect();
    let expected: Vec<String> = (0..10).map(|i| format!("seq={}", i)).collect();
    assert_eq!(data, expected);
}
