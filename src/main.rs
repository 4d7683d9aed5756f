use std::collections::BTreeMap;

use log::info;
use record_region::sample::SampleRecord;
use record_region::sources::{BufferPool, HeapBlock};
use record_region::types::FieldValue;
use record_region::{
    PackedBuffer, Record, RecordError, RecordHandle, RecordReadable, RecordWritable, Region,
    StorageClass, adopt, bind_view, materialize, size_of, write_into,
};
use serde::Serialize;

const PACKED_SLOTS: usize = 10;

/// One line of the comparison table.
#[derive(Debug, Serialize)]
struct Row {
    source: &'static str,
    storage: StorageClass,
    original: BTreeMap<&'static str, FieldValue>,
    through_view: BTreeMap<&'static str, FieldValue>,
    copy: BTreeMap<&'static str, FieldValue>,
    copy_storage: StorageClass,
    adopted_storage: StorageClass,
}

/// Write, bind, mutate through the view, materialize, then adopt.
fn run(source: &'static str, region: Region<'_>) -> Result<Row, RecordError> {
    let original = SampleRecord::new(342, 356, f32::NAN);
    write_into(&original, &region)?;

    let mut view = bind_view::<SampleRecord>(region)?;
    view.set_i32("intField", 42)?;
    view.set_i64("longField", 7)?;
    view.set_f32("floatField", 0.0)?;

    let copy: SampleRecord = materialize(&region)?;
    let through_view = view.to_map();
    let copy_fields = copy.to_map();
    let copy_storage = StorageClass::Owned;

    // Overwrites the region; the snapshots above are already taken.
    let mut handle = RecordHandle::new(SampleRecord::new(1, 2, 3.0));
    adopt(&mut handle, region)?;

    Ok(Row {
        source,
        storage: view.storage_class(),
        original: original.to_map(),
        through_view,
        copy: copy_fields,
        copy_storage,
        adopted_storage: handle.storage_class(),
    })
}

fn fmt_fields(fields: &BTreeMap<&'static str, FieldValue>) -> String {
    ["intField", "longField", "floatField"]
        .iter()
        .map(|name| fields.get(*name).map_or("-".to_string(), |v| v.to_string()))
        .collect::<Vec<_>>()
        .join(", ")
}

fn print_table(rows: &[Row]) {
    println!(
        "{:<8} {:<10} {:<22} {:<22} {:<22} {:<8}",
        "source", "storage", "original", "through view", "copy", "copy"
    );
    println!("{}", "-".repeat(96));
    for row in rows {
        println!(
            "{:<8} {:<10} {:<22} {:<22} {:<22} {:<8}",
            row.source,
            row.storage.to_string(),
            fmt_fields(&row.original),
            fmt_fields(&row.through_view),
            fmt_fields(&row.copy),
            row.copy_storage.to_string(),
        );
    }
}

fn run_packed(block: &mut HeapBlock) -> Result<(), RecordError> {
    let packed = PackedBuffer::<SampleRecord>::new(block.region(), PACKED_SLOTS)?;
    for i in 0..packed.len() {
        packed.write(i, &SampleRecord::default().with_index(i as i32))?;
    }
    packed.view(3)?.set_i32("index", 300)?;

    let indices: Vec<String> = packed
        .iter()
        .map(|v| v.load().index.to_string())
        .collect();
    println!(
        "\n{} records packed in {} bytes of {} storage: [{}]",
        packed.len(),
        packed.len() * packed.slot_size(),
        packed.storage_class(),
        indices.join(", ")
    );
    if let Err(err) = packed.view(packed.len()) {
        println!("slot {} rejected: {err}", packed.len());
    }
    Ok(())
}

fn main() -> Result<(), RecordError> {
    env_logger::init();
    let json = std::env::args().any(|a| a == "--json");

    let size = size_of::<SampleRecord>()?;
    info!(
        "SampleRecord: {size} payload bytes, {} bytes as an owned value",
        std::mem::size_of::<SampleRecord>()
    );

    let pool = BufferPool::default();
    let mut stack_buf = [0u8; 64];
    let mut pooled = pool.checkout(size);
    let mut block = HeapBlock::new(size)?;

    let rows = vec![
        run("stack", Region::stack(&mut stack_buf[..size]))?,
        run("pool", pooled.region())?,
        run("heap", block.region())?,
    ];

    if json {
        for row in &rows {
            match serde_json::to_string(row) {
                Ok(line) => println!("{line}"),
                Err(err) => log::error!("failed to encode row for {}: {err}", row.source),
            }
        }
    } else {
        print_table(&rows);
        for row in &rows {
            println!("{}: adopted handle now lives in {} storage", row.source, row.adopted_storage);
        }
    }

    let mut packed_block = HeapBlock::new(PackedBuffer::<SampleRecord>::required_len(PACKED_SLOTS)?)?;
    run_packed(&mut packed_block)?;

    let reused = materialize::<SampleRecord>(&pooled.region())?;
    info!("pooled bytes still hold intField = {}", reused.payload().int_field);
    Ok(())
}
