//! Readers for the PLINK-style inputs and the writer for the removal list.
//! Everything here produces or consumes the typed records the core works on;
//! no algorithmic decision lives at this boundary.

use crate::cust_error::ImportError;
use crate::sample::{PairCategory, Phenotype, PhenotypeTable, RelatednessRecord, SampleId};
use std::io::{self, BufRead, Write};

/// Column of the .genome record holding the pair-category discriminant.
const CATEGORY_FIELD: usize = 10;
/// Column of the .fam record holding the case/control status code.
const STATUS_FIELD: usize = 5;

/// Reads a filtered `.genome` input into relatedness records.
///
/// The first line is the header and is skipped. Each following record names
/// two samples by family and individual id in its first four fields; the
/// discriminant field is decoded when the record is long enough to carry it.
/// Records that are truncated, pair a sample with itself or hold an
/// unreadable discriminant abort the import.
pub fn read_genome<R: BufRead>(genome: R) -> Result<Vec<RelatednessRecord>, ImportError> {
    let mut lines = genome.lines();
    if lines.next().transpose()?.is_none() {
        return Ok(Vec::new());
    }
    let mut records = Vec::new();
    for line in lines {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 4 {
            return Err(ImportError::Truncated(fields.len()));
        }
        let a = SampleId::new(fields[0], fields[1]);
        let b = SampleId::new(fields[2], fields[3]);
        if a == b {
            return Err(ImportError::SelfPair(a));
        }
        let category = match fields.get(CATEGORY_FIELD) {
            Some(raw) => Some(PairCategory::from_code(raw.parse::<i64>()?)?),
            None => None,
        };
        records.push(RelatednessRecord { a, b, category });
    }
    Ok(records)
}

/// Reads a `.fam` input into a phenotype table. One sample per line, family
/// and individual id in the first two fields, status code in the sixth.
pub fn read_fam<R: BufRead>(fam: R) -> Result<PhenotypeTable, ImportError> {
    let mut table = PhenotypeTable::default();
    for line in fam.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() <= STATUS_FIELD {
            return Err(ImportError::Truncated(fields.len()));
        }
        table.insert(
            SampleId::new(fields[0], fields[1]),
            Phenotype::from_status(fields[STATUS_FIELD]),
        );
    }
    Ok(table)
}

/// Writes the removal list, one `"familyID individualID"` per line.
pub fn write_removals<W: Write>(removals: &[SampleId], mut out: W) -> Result<(), io::Error> {
    for sample in removals {
        writeln!(out, "{}", sample)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn read_genome_test() {
        let genome = Cursor::new(
            "FID1 IID1 FID2 IID2 RT EZ Z0 Z1 Z2 PI_HAT PHE DST PPC RATIO\n\
             F1 A F1 B OT 0 0.5 0.3 0.2 0.4 1 0.9 0.9 2.1\n\
             F1 A F2 C OT 0 0.5 0.3 0.2 0.3 0 0.9 0.9 2.1\n\
             F3 D F3 E OT 0 0.5 0.3 0.2 0.5 -1 0.9 0.9 2.1\n",
        );
        let records = read_genome(genome).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].a, SampleId::new("F1", "A"));
        assert_eq!(records[0].b, SampleId::new("F1", "B"));
        assert_eq!(records[0].category, Some(PairCategory::BothCases));
        assert_eq!(records[1].category, Some(PairCategory::Mixed));
        assert_eq!(records[2].category, Some(PairCategory::BothControls));
    }

    #[test]
    fn read_genome_without_category_test() {
        let genome = Cursor::new("FID1 IID1 FID2 IID2\nF1 A F1 B\n");
        let records = read_genome(genome).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].category, None);
    }

    #[test]
    fn read_genome_empty_test() {
        assert!(read_genome(Cursor::new("")).unwrap().is_empty());
        // A header alone yields no records either.
        let genome = Cursor::new("FID1 IID1 FID2 IID2 RT EZ Z0 Z1 Z2 PI_HAT PHE\n");
        assert!(read_genome(genome).unwrap().is_empty());
    }

    #[test]
    fn read_genome_failure_test() {
        let truncated = Cursor::new("header\nF1 A F1\n");
        assert!(matches!(
            read_genome(truncated),
            Err(ImportError::Truncated(3))
        ));
        let self_pair = Cursor::new("header\nF1 A F1 A\n");
        assert!(matches!(
            read_genome(self_pair),
            Err(ImportError::SelfPair(_))
        ));
        let bad_category =
            Cursor::new("header\nF1 A F1 B OT 0 0.5 0.3 0.2 0.4 5 0.9 0.9 2.1\n");
        assert!(matches!(
            read_genome(bad_category),
            Err(ImportError::UnknownCategory(5))
        ));
        let not_an_int =
            Cursor::new("header\nF1 A F1 B OT 0 0.5 0.3 0.2 0.4 x 0.9 0.9 2.1\n");
        assert!(matches!(read_genome(not_an_int), Err(ImportError::BadInt(_))));
    }

    #[test]
    fn read_fam_test() {
        let fam = Cursor::new(
            "F1 A 0 0 1 2\n\
             F1 B 0 0 2 1\n\
             F2 C 0 0 1 0\n",
        );
        let table = read_fam(fam).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(
            table.status(&SampleId::new("F1", "A")),
            Some(Phenotype::Case)
        );
        assert_eq!(
            table.status(&SampleId::new("F1", "B")),
            Some(Phenotype::Control)
        );
        assert_eq!(
            table.status(&SampleId::new("F2", "C")),
            Some(Phenotype::Unknown)
        );
        assert_eq!(table.status(&SampleId::new("F9", "Z")), None);
    }

    #[test]
    fn read_fam_truncated_test() {
        let fam = Cursor::new("F1 A 0 0 1\n");
        assert!(matches!(read_fam(fam), Err(ImportError::Truncated(5))));
    }

    #[test]
    fn write_removals_test() {
        let removals = vec![SampleId::new("F1", "A"), SampleId::new("F2", "C")];
        let mut out = Vec::new();
        write_removals(&removals, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "F1 A\nF2 C\n");
    }
}
