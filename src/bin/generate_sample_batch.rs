use anyhow::{Context, Result};
use rand::Rng;
use std::env;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::time::Instant;

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: {} <output.csv> <rows>", args[0]);
        std::process::exit(1);
    }
    let rows: usize = args[2]
        .parse()
        .expect("Please provide a valid number for rows");

    println!("🚀 Generating sample deposit batch ({} rows)", rows);
    generate_sample_csv(&args[1], rows)
        .with_context(|| format!("Failed to generate {}", args[1]))?;
    println!("\n✅ Successfully generated {}", args[1]);

    Ok(())
}

fn generate_sample_csv(file_path: &str, rows: usize) -> Result<()> {
    let start_time = Instant::now();
    let file = File::create(file_path)?;
    let mut writer = BufWriter::new(file);

    writer.write_all(b"SUCURSAL,CUENTA,IMPORTE,SOLICITUD,CBU,CUOTA,CUIL,CUIL_APODERADO\n")?;

    let mut rng = rand::rng();
    for i in 0..rows {
        let sucursal = rng.random_range(1..=999u32);
        let cuenta = rng.random_range(100_000..=999_999_999u64);
        let importe = format!(
            "{}.{:02}",
            rng.random_range(1_000..=500_000u64),
            rng.random_range(0..100u32)
        );
        let solicitud = i + 1;
        let cbu = format!(
            "{:011}{:011}",
            rng.random_range(0..=99_999_999_999u64),
            rng.random_range(0..=99_999_999_999u64)
        );
        // Roughly one in ten rows carries the ineligible installment marker
        let cuota = if rng.random_range(0..10u32) == 0 {
            "3".to_string()
        } else {
            format!("{:02}", rng.random_range(1..=24u32))
        };
        let cuil = format!("20{:09}", rng.random_range(0..=999_999_999u64));
        let cuil_apoderado = if rng.random_bool(0.3) {
            format!("23{:09}", rng.random_range(0..=999_999_999u64))
        } else {
            String::new()
        };
        writeln!(
            writer,
            "{sucursal},{cuenta},{importe},{solicitud},{cbu},{cuota},{cuil},{cuil_apoderado}"
        )?;
    }
    writer.flush()?;
    println!("   -> Done: {} rows in {:.2?}", rows, start_time.elapsed());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_generate_sample_csv_creates_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("sample.csv");
        generate_sample_csv(path.to_str().expect("utf-8 path"), 25)?;
        let content = fs::read_to_string(&path)?;
        assert_eq!(content.lines().count(), 26);
        assert!(content.starts_with("SUCURSAL,CUENTA,IMPORTE"));
        Ok(())
    }
}
