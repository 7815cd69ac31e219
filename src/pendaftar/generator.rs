//! Synthetic pendaftar generation.
//!
//! The generator holds no random state of its own: callers pass the RNG in,
//! so a seeded `StdRng` reproduces the exact same batch of records.

use chrono::{Datelike, Days, Local, Months, NaiveDate};
use rand::Rng;

use super::locale;
use super::models::{
    Gelombang, IjazahTerakhir, JenisKelamin, Pekerjaan, Pendaftar, Provinsi, RencanaProgram,
    RencanaTingkat, StatusBerkas, StatusOrangTua,
};
use super::sampler::Categorical;

pub const NIK_LENGTH: usize = 16;
pub const NISN_LENGTH: usize = 10;
pub const MIN_AGE_YEARS: u32 = 10;
pub const MAX_AGE_YEARS: u32 = 18;

const PHONE_SUFFIX_LENGTH: usize = 8;
const MAX_HOUSE_NUMBER: u32 = 250;
const DOUBLE_GIVEN_NAME_CHANCE: f64 = 0.3;

const JENIS_KELAMIN: Categorical<JenisKelamin> = Categorical::of_all();
const IJAZAH: Categorical<IjazahTerakhir> = Categorical::of_all();
const TINGKAT: Categorical<RencanaTingkat> = Categorical::of_all();
const PROGRAM: Categorical<RencanaProgram> = Categorical::of_all();
const STATUS_ORTU: Categorical<StatusOrangTua> = Categorical::of_all();
const PEKERJAAN: Categorical<Pekerjaan> = Categorical::of_all();
const PROVINSI: Categorical<Provinsi> = Categorical::of_all();
const GELOMBANG: Categorical<Gelombang> = Categorical::of_all();

const MALE_GIVEN: Categorical<&str> = Categorical::new(locale::MALE_GIVEN_NAMES);
const FEMALE_GIVEN: Categorical<&str> = Categorical::new(locale::FEMALE_GIVEN_NAMES);
const MALE_FAMILY: Categorical<&str> = Categorical::new(locale::MALE_FAMILY_NAMES);
const FEMALE_FAMILY: Categorical<&str> = Categorical::new(locale::FEMALE_FAMILY_NAMES);
const CITY: Categorical<&str> = Categorical::new(locale::CITIES);
const STREET_PREFIX: Categorical<&str> = Categorical::new(locale::STREET_PREFIXES);
const STREET: Categorical<&str> = Categorical::new(locale::STREET_NAMES);
const VILLAGE_PREFIX: Categorical<&str> = Categorical::new(locale::VILLAGE_PREFIXES);
const PHONE_PREFIX: Categorical<&str> = Categorical::new(locale::PHONE_PREFIXES);

/// Produces one fake applicant per call.
#[derive(Debug, Clone, Default)]
pub struct PendaftarGenerator {
    reference_date: Option<NaiveDate>,
}

impl PendaftarGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin "today" instead of reading the local clock on every call.
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Pendaftar {
        let today = self
            .reference_date
            .unwrap_or_else(|| Local::now().date_naive());
        self.generate_on(rng, today)
    }

    pub fn generate_on<R: Rng + ?Sized>(&self, rng: &mut R, today: NaiveDate) -> Pendaftar {
        let jenis_kelamin = JENIS_KELAMIN.pick(rng);
        let nama_lengkap = full_name(rng, jenis_kelamin);

        Pendaftar {
            nik_calon: numerify(rng, NIK_LENGTH),
            nisn: numerify(rng, NISN_LENGTH),
            nama_lengkap,
            tempat_lahir: CITY.sample(rng).to_string(),
            tanggal_lahir: birth_date(rng, today),
            jenis_kelamin,

            alamat_jalan: street_address(rng),
            desa: format!(
                "{} {}",
                VILLAGE_PREFIX.sample(rng),
                family_name(rng, jenis_kelamin)
            ),
            kecamatan: format!("Kec. {}", CITY.sample(rng)),
            kota_kabupaten: format!("Kab. {}", CITY.sample(rng)),
            provinsi: PROVINSI.pick(rng),

            ijazah_formal_terakhir: IJAZAH.pick(rng),
            rencana_tingkat: TINGKAT.pick(rng),
            rencana_program: PROGRAM.pick(rng),

            nama_ayah: full_name(rng, JenisKelamin::LakiLaki),
            nik_ayah: numerify(rng, NIK_LENGTH),
            status_ayah: STATUS_ORTU.pick(rng),
            pekerjaan_ayah: PEKERJAAN.pick(rng),

            nama_ibu: full_name(rng, JenisKelamin::Perempuan),
            nik_ibu: numerify(rng, NIK_LENGTH),
            status_ibu: STATUS_ORTU.pick(rng),
            pekerjaan_ibu: PEKERJAAN.pick(rng),

            telepon_orang_tua: phone_number(rng),
            status_berkas: StatusBerkas::Pending,
            gelombang: GELOMBANG.pick(rng),
        }
    }
}

/// Random digit string of exactly `len` characters; leading zeros allowed.
pub fn numerify<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}

pub fn full_name<R: Rng + ?Sized>(rng: &mut R, jenis_kelamin: JenisKelamin) -> String {
    let given = match jenis_kelamin {
        JenisKelamin::LakiLaki => MALE_GIVEN,
        JenisKelamin::Perempuan => FEMALE_GIVEN,
    };

    let mut parts = vec![*given.sample(rng)];
    if rng.gen_bool(DOUBLE_GIVEN_NAME_CHANCE) {
        parts.push(*given.sample(rng));
    }
    parts.push(family_name(rng, jenis_kelamin));
    parts.join(" ")
}

fn family_name<R: Rng + ?Sized>(rng: &mut R, jenis_kelamin: JenisKelamin) -> &'static str {
    match jenis_kelamin {
        JenisKelamin::LakiLaki => *MALE_FAMILY.sample(rng),
        JenisKelamin::Perempuan => *FEMALE_FAMILY.sample(rng),
    }
}

fn street_address<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!(
        "{} {} No. {}",
        STREET_PREFIX.sample(rng),
        STREET.sample(rng),
        rng.gen_range(1..=MAX_HOUSE_NUMBER)
    )
}

pub fn phone_number<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!(
        "{}{}",
        PHONE_PREFIX.sample(rng),
        numerify(rng, PHONE_SUFFIX_LENGTH)
    )
}

/// Inclusive range of birth dates whose calendar age on `today` is
/// `MIN_AGE_YEARS..MAX_AGE_YEARS`.
pub fn birth_date_window(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let latest = today
        .checked_sub_months(Months::new(MIN_AGE_YEARS * 12))
        .unwrap_or(today);
    let earliest = today
        .checked_sub_months(Months::new(MAX_AGE_YEARS * 12))
        .and_then(|date| date.succ_opt())
        .unwrap_or(latest);
    (earliest, latest)
}

pub fn birth_date<R: Rng + ?Sized>(rng: &mut R, today: NaiveDate) -> NaiveDate {
    let (earliest, latest) = birth_date_window(today);
    let span = (latest - earliest).num_days().max(0) as u64;
    let offset = rng.gen_range(0..=span);
    earliest.checked_add_days(Days::new(offset)).unwrap_or(earliest)
}

/// Completed years between `birth` and `today`.
pub fn age_on(birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pendaftar::sampler::OptionSet;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn is_digits(value: &str, len: usize) -> bool {
        value.len() == len && value.chars().all(|c| c.is_ascii_digit())
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    #[test]
    fn test_identity_fields_are_fixed_width_digits() {
        let generator = PendaftarGenerator::new().with_reference_date(today());
        let mut rng = StdRng::seed_from_u64(1);

        for _ in 0..500 {
            let p = generator.generate(&mut rng);
            assert!(is_digits(&p.nik_calon, NIK_LENGTH), "nikcalon {}", p.nik_calon);
            assert!(is_digits(&p.nik_ayah, NIK_LENGTH), "nikayah {}", p.nik_ayah);
            assert!(is_digits(&p.nik_ibu, NIK_LENGTH), "nikibu {}", p.nik_ibu);
            assert!(is_digits(&p.nisn, NISN_LENGTH), "nisn {}", p.nisn);
        }
    }

    #[test]
    fn test_constant_fields_over_thousand_records() {
        let generator = PendaftarGenerator::new();
        let mut rng = StdRng::seed_from_u64(2);

        for _ in 0..1000 {
            let p = generator.generate(&mut rng);
            assert!(matches!(p.jenis_kelamin.as_str(), "L" | "P"));
            assert_eq!(p.status_berkas.as_str(), "PENDING");
        }
    }

    #[test]
    fn test_enumerated_fields_are_members_of_their_sets() {
        let generator = PendaftarGenerator::new().with_reference_date(today());
        let mut rng = StdRng::seed_from_u64(3);

        for _ in 0..300 {
            let p = generator.generate(&mut rng);
            let row = serde_json::to_value(&p).unwrap();
            let field = |key: &str| row[key].as_str().unwrap().to_string();

            assert!(IjazahTerakhir::from_label(&field("ijazahformalterakhir")).is_some());
            assert!(RencanaTingkat::from_label(&field("rencanatingkat")).is_some());
            assert!(RencanaProgram::from_label(&field("rencanaprogram")).is_some());
            assert!(StatusOrangTua::from_label(&field("statusayah")).is_some());
            assert!(StatusOrangTua::from_label(&field("statusibu")).is_some());
            assert!(Pekerjaan::from_label(&field("pekerjaanayah")).is_some());
            assert!(Pekerjaan::from_label(&field("pekerjaanibu")).is_some());
            assert!(Provinsi::from_label(&field("provinsi")).is_some());
            assert!(Gelombang::from_label(&field("gelombang")).is_some());
        }
    }

    #[test]
    fn test_names_follow_gender() {
        let generator = PendaftarGenerator::new();
        let mut rng = StdRng::seed_from_u64(4);

        for _ in 0..300 {
            let p = generator.generate(&mut rng);
            let first = p.nama_lengkap.split(' ').next().unwrap();
            match p.jenis_kelamin {
                JenisKelamin::LakiLaki => assert!(locale::MALE_GIVEN_NAMES.contains(&first)),
                JenisKelamin::Perempuan => assert!(locale::FEMALE_GIVEN_NAMES.contains(&first)),
            }

            let ayah = p.nama_ayah.split(' ').next().unwrap();
            let ibu = p.nama_ibu.split(' ').next().unwrap();
            assert!(locale::MALE_GIVEN_NAMES.contains(&ayah));
            assert!(locale::FEMALE_GIVEN_NAMES.contains(&ibu));
        }
    }

    #[test]
    fn test_address_prefixes_and_phone_format() {
        let generator = PendaftarGenerator::new();
        let mut rng = StdRng::seed_from_u64(5);

        for _ in 0..200 {
            let p = generator.generate(&mut rng);
            assert!(p.kecamatan.starts_with("Kec. "));
            assert!(p.kota_kabupaten.starts_with("Kab. "));
            assert!(p.alamat_jalan.contains(" No. "));

            let (prefix, suffix) = p.telepon_orang_tua.split_at(4);
            assert!(locale::PHONE_PREFIXES.contains(&prefix));
            assert!(is_digits(suffix, PHONE_SUFFIX_LENGTH));
        }
    }

    #[test]
    fn test_birth_dates_stay_inside_school_age_window() {
        let generator = PendaftarGenerator::new();
        let reference_dates = [
            today(),
            NaiveDate::from_ymd_opt(2028, 2, 29).unwrap(),
            NaiveDate::from_ymd_opt(2030, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2030, 2, 28).unwrap(),
            NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
        ];
        let mut rng = StdRng::seed_from_u64(6);

        for reference in reference_dates {
            for _ in 0..400 {
                let p = generator.generate_on(&mut rng, reference);
                let age = age_on(p.tanggal_lahir, reference);
                assert!(
                    (MIN_AGE_YEARS as i32..MAX_AGE_YEARS as i32).contains(&age),
                    "born {} is {} years old on {}",
                    p.tanggal_lahir,
                    age,
                    reference
                );
            }
        }
    }

    #[test]
    fn test_birth_window_edges() {
        let (earliest, latest) = birth_date_window(today());
        assert_eq!(earliest, NaiveDate::from_ymd_opt(2008, 10, 20).unwrap());
        assert_eq!(latest, NaiveDate::from_ymd_opt(2016, 10, 19).unwrap());
        assert_eq!(age_on(earliest, today()), 17);
        assert_eq!(age_on(latest, today()), 10);
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let generator = PendaftarGenerator::new().with_reference_date(today());
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);

        let first: Vec<Pendaftar> = (0..20).map(|_| generator.generate(&mut a)).collect();
        let second: Vec<Pendaftar> = (0..20).map(|_| generator.generate(&mut b)).collect();

        assert_eq!(first, second);
    }

    #[test]
    fn test_serialized_record_uses_table_columns() {
        let generator = PendaftarGenerator::new().with_reference_date(today());
        let mut rng = StdRng::seed_from_u64(8);
        let p = generator.generate(&mut rng);

        let row = serde_json::to_value(&p).unwrap();
        let object = row.as_object().unwrap();

        assert_eq!(object.len(), 25);
        for (column, value) in p.columns() {
            assert_eq!(object[column].as_str().unwrap(), value, "column {}", column);
        }
        assert_eq!(object["statusberkas"], "PENDING");
    }
}
