use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rust_xlsxwriter::Workbook;

const HEADER: [&str; 5] = ["hari", "tanggal", "kegiatan", "curah_hujan", "Penjualan (pcs)"];

/// One synthetic day of sales.
struct Day {
    hari: i64,
    tanggal: i64,
    kegiatan: i64,
    curah_hujan: f64,
    penjualan: i64,
}

fn generate(days: usize, rng: &mut ChaCha8Rng) -> Vec<Day> {
    (0..days)
        .map(|i| {
            let hari = (i % 7) as i64;
            let tanggal = (i % 30) as i64 + 1;
            let kegiatan = i64::from(rng.random_bool(0.3));
            let curah_hujan = if rng.random_bool(0.4) {
                (rng.random::<f64>() * 60.0 * 10.0).round() / 10.0
            } else {
                0.0
            };
            let weekend = if hari >= 5 { 25.0 } else { 0.0 };
            let noise = rng.random_range(-8.0..8.0);
            let expected = 120.0 + weekend + 40.0 * kegiatan as f64 - 0.9 * curah_hujan
                + 0.3 * tanggal as f64
                + noise;
            Day {
                hari,
                tanggal,
                kegiatan,
                curah_hujan,
                penjualan: expected.round().max(0.0) as i64,
            }
        })
        .collect()
}

fn write_csv(path: &str, days: &[Day]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV")?;
    writer.write_record(HEADER)?;
    for d in days {
        writer.write_record([
            d.hari.to_string(),
            d.tanggal.to_string(),
            d.kegiatan.to_string(),
            d.curah_hujan.to_string(),
            d.penjualan.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_xlsx(path: &str, days: &[Day]) -> Result<()> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Penjualan").context("naming sheet")?;
    for (col, name) in HEADER.iter().enumerate() {
        sheet.write_string(0, col as u16, *name)?;
    }
    for (i, d) in days.iter().enumerate() {
        let row = i as u32 + 1;
        sheet.write_number(row, 0, d.hari as f64)?;
        sheet.write_number(row, 1, d.tanggal as f64)?;
        sheet.write_number(row, 2, d.kegiatan as f64)?;
        sheet.write_number(row, 3, d.curah_hujan)?;
        sheet.write_number(row, 4, d.penjualan as f64)?;
    }
    workbook.save(path).context("saving workbook")?;
    Ok(())
}

fn write_parquet(path: &str, days: &[Day]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("hari", DataType::Int64, false),
        Field::new("tanggal", DataType::Int64, false),
        Field::new("kegiatan", DataType::Int64, false),
        Field::new("curah_hujan", DataType::Float64, false),
        Field::new("Penjualan (pcs)", DataType::Int64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from_iter_values(days.iter().map(|d| d.hari))),
            Arc::new(Int64Array::from_iter_values(days.iter().map(|d| d.tanggal))),
            Arc::new(Int64Array::from_iter_values(days.iter().map(|d| d.kegiatan))),
            Arc::new(Float64Array::from_iter_values(days.iter().map(|d| d.curah_hujan))),
            Arc::new(Int64Array::from_iter_values(days.iter().map(|d| d.penjualan))),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let days = generate(120, &mut rng);

    write_xlsx("sample_sales.xlsx", &days)?;
    write_csv("sample_sales.csv", &days)?;
    write_parquet("sample_sales.parquet", &days)?;

    println!(
        "Wrote {} days to sample_sales.xlsx, sample_sales.csv and sample_sales.parquet",
        days.len()
    );
    Ok(())
}
