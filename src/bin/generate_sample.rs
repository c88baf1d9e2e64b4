use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    fn pick<'a>(&mut self, items: &'a [&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

static SPECIES: [&str; 8] = [
    "Bacillus subtilis",
    "Bacillus cereus",
    "Escherichia coli",
    "Lactobacillus plantarum",
    "Pseudomonas fluorescens",
    "Streptomyces coelicolor",
    "Staphylococcus aureus",
    "Clostridium butyricum",
];

const PRODUCED: [&str; 6] = ["acetate", "lactate", "butyrate", "ethanol", "propionate", "indole"];
const UTILIZED: [&str; 5] = ["glucose", "xylose", "sucrose", "lactose", "glycerol"];
const ANTIMICROBIAL: [&str; 4] = ["nisin", "surfactin", "bacitracin", "pyocyanin"];

/// One strain as shared by all three files (they are matched by position).
struct Strain {
    id: Option<u32>,
    species: &'static str,
    is_type_strain: Option<u8>,
    designation: String,
    strain_number: u32,
}

fn write_dataset(
    path: &Path,
    strains: &[Strain],
    metabolites: &[&str],
    presence: f64,
    rng: &mut SimpleRng,
) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;

    let mut header = vec!["id", "species", "is_type_strain", "designation", "strain_number"];
    header.extend_from_slice(metabolites);
    writer.write_record(&header)?;

    for strain in strains {
        let mut row = vec![
            strain.id.map(|v| v.to_string()).unwrap_or_default(),
            strain.species.to_string(),
            strain.is_type_strain.map(|v| v.to_string()).unwrap_or_default(),
            strain.designation.clone(),
            strain.strain_number.to_string(),
        ];
        for _ in metabolites {
            row.push(if rng.chance(presence) { "1" } else { "0" }.to_string());
        }
        writer.write_record(&row)?;
    }

    writer.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("metabolites"));
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let mut rng = SimpleRng::new(42);

    let strains: Vec<Strain> = (1..=60u32)
        .map(|i| {
            let species = rng.pick(&SPECIES);
            // A few blank ids and indicators, read back as 0.
            let id = if rng.chance(0.05) { None } else { Some(i) };
            let is_type_strain = if rng.chance(0.05) {
                None
            } else {
                Some(u8::from(rng.chance(0.3)))
            };
            Strain {
                id,
                species,
                is_type_strain,
                designation: format!("DSM {}", 1000 + i * 7),
                strain_number: 5000 + i,
            }
        })
        .collect();

    write_dataset(&out_dir.join("prod.csv"), &strains, &PRODUCED, 0.4, &mut rng)?;
    write_dataset(&out_dir.join("util.csv"), &strains, &UTILIZED, 0.5, &mut rng)?;
    write_dataset(&out_dir.join("anti.csv"), &strains, &ANTIMICROBIAL, 0.15, &mut rng)?;

    println!(
        "Wrote {} strains to prod.csv, util.csv and anti.csv in {}",
        strains.len(),
        out_dir.display()
    );
    Ok(())
}
