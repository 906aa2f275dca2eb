use std::env;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Bayer index matrix of size `2^order`, built by the recursive doubling
/// `[[4B, 4B+2], [4B+3, 4B+1]]` starting from the 1x1 matrix `[0]`.
fn bayer_ranks(order: u32) -> Vec<u32> {
    let mut size = 1usize;
    let mut ranks = vec![0u32];
    for _ in 0..order {
        let next_size = size * 2;
        let mut next = vec![0u32; next_size * next_size];
        for y in 0..size {
            for x in 0..size {
                let base = 4 * ranks[y * size + x];
                next[y * next_size + x] = base;
                next[y * next_size + x + size] = base + 2;
                next[(y + size) * next_size + x] = base + 3;
                next[(y + size) * next_size + x + size] = base + 1;
            }
        }
        size = next_size;
        ranks = next;
    }
    ranks
}

/// Clustered-dot 4x4 ranks: growth spirals out from the centre cell.
const CLUSTERED_4X4: [u32; 16] = [12, 5, 6, 13, 4, 0, 1, 7, 11, 3, 2, 8, 15, 10, 9, 14];

fn write_table(file: &mut File, name: &str, size: usize, ranks: &[u32]) {
    assert_eq!(ranks.len(), size * size, "{name} must be square");
    let cells = (size * size) as f64;
    writeln!(file, "/// {size}x{size} thresholds, row-major, `(rank + 0.5) / {}`", size * size).unwrap();
    writeln!(file, "pub const {name}: [f32; {}] = [", size * size).unwrap();
    for (i, &rank) in ranks.iter().enumerate() {
        if i > 0 && i % size == 0 {
            writeln!(file).unwrap();
        }
        let value = (rank as f64 + 0.5) / cells;
        write!(file, "    {:?},", value as f32).unwrap();
    }
    writeln!(file, "\n];").unwrap();
    writeln!(file).unwrap();
}

fn main() {
    let out_dir = env::var("OUT_DIR").unwrap();
    let dest_path = Path::new(&out_dir).join("threshold_tables.rs");
    let mut file = File::create(&dest_path).unwrap();

    write_table(&mut file, "BAYER_2X2", 2, &bayer_ranks(1));
    write_table(&mut file, "BAYER_4X4", 4, &bayer_ranks(2));
    write_table(&mut file, "BAYER_8X8", 8, &bayer_ranks(3));
    write_table(&mut file, "CLUSTERED_4X4", 4, &CLUSTERED_4X4);

    println!("cargo::rerun-if-changed=build.rs");
}
