use criterion::{Criterion, criterion_group, criterion_main};
use record_region::sample::SampleRecord;
use record_region::sources::{BufferPool, HeapBlock};
use record_region::types::FieldValue;
use record_region::{
    PackedBuffer, RecordReadable, RecordWritable, Region, bind_view, materialize, size_of,
    write_into,
};
use std::hint::black_box;

const SIZE: usize = 24;
const SLOTS: usize = 1024;

fn make_record() -> SampleRecord {
    SampleRecord::new(342, 356, 1.5).with_index(7)
}

// ═══════════════════════════════════════════════════════════════════════════
// Group 1: Single-record operations
// ═══════════════════════════════════════════════════════════════════════════

fn bench_single_record(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_record");
    let record = make_record();

    group.bench_function("size_of", |b| b.iter(|| size_of::<SampleRecord>().unwrap()));

    group.bench_function("write_into (stack)", |b| {
        let mut buf = [0u8; SIZE];
        let region = Region::stack(&mut buf);
        b.iter(|| write_into(black_box(&record), &region).unwrap())
    });

    group.bench_function("bind_view", |b| {
        let mut buf = [0u8; SIZE];
        let region = Region::stack(&mut buf);
        write_into(&record, &region).unwrap();
        b.iter(|| bind_view::<SampleRecord>(black_box(region)).unwrap())
    });

    group.bench_function("materialize", |b| {
        let mut buf = [0u8; SIZE];
        let region = Region::stack(&mut buf);
        write_into(&record, &region).unwrap();
        b.iter(|| materialize::<SampleRecord>(black_box(&region)).unwrap())
    });

    group.finish();
}

// ═══════════════════════════════════════════════════════════════════════════
// Group 2: Field access through a view
// ═══════════════════════════════════════════════════════════════════════════

fn bench_view_fields(c: &mut Criterion) {
    let mut group = c.benchmark_group("view_fields");
    let mut block = HeapBlock::new(SIZE).unwrap();
    let region = block.region();
    write_into(&make_record(), &region).unwrap();
    let mut view = bind_view::<SampleRecord>(region).unwrap();
    let slot = view.resolve("intField").unwrap();

    group.bench_function("get_i32 (by name)", |b| {
        b.iter(|| black_box(view.get_i32(black_box("intField"))))
    });

    group.bench_function("get_field_at (FieldSlot)", |b| {
        b.iter(|| black_box(view.get_field_at(black_box(&slot))))
    });

    group.bench_function("load (whole payload)", |b| b.iter(|| black_box(view.load())));

    group.bench_function("set_i32 (by name)", |b| {
        b.iter(|| view.set_i32(black_box("intField"), black_box(42)).unwrap())
    });

    group.bench_function("set_field_at (FieldSlot)", |b| {
        b.iter(|| {
            view.set_field_at(black_box(&slot), FieldValue::I32(black_box(42)))
                .unwrap()
        })
    });

    group.finish();
}

// ═══════════════════════════════════════════════════════════════════════════
// Group 3: Packed buffers vs one allocation per record
// ═══════════════════════════════════════════════════════════════════════════

fn bench_packing(c: &mut Criterion) {
    let mut group = c.benchmark_group("packing");

    group.bench_function("packed write+read (pooled)", |b| {
        let pool = BufferPool::default();
        b.iter(|| {
            let mut buf = pool.checkout(SIZE * SLOTS);
            let packed = PackedBuffer::<SampleRecord>::new(buf.region(), SLOTS).unwrap();
            let record = make_record();
            for i in 0..SLOTS {
                packed.write(i, &record).unwrap();
            }
            packed.iter().map(|v| v.load().index as i64).sum::<i64>()
        })
    });

    group.bench_function("Vec<SampleRecord> (one value per record)", |b| {
        b.iter(|| {
            let records: Vec<SampleRecord> = (0..SLOTS).map(|_| make_record()).collect();
            black_box(&records).iter().map(|r| r.get_i32("index").unwrap_or(0) as i64).sum::<i64>()
        })
    });

    group.finish();
}

// ─── Criterion Main ─────────────────────────────────────────────────────────

criterion_group!(benches, bench_single_record, bench_view_fields, bench_packing);
criterion_main!(benches);
