use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::sampler::OptionSet;

/// Declares a closed option set whose serde form is its database label.
macro_rules! option_set {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl OptionSet for $name {
            const ALL: &'static [Self] = &[$($name::$variant),+];

            fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

option_set!(
    /// Stored as the single letter the admission forms use.
    JenisKelamin {
        LakiLaki => "L",
        Perempuan => "P",
    }
);

option_set!(
    IjazahTerakhir {
        Sd => "SD",
        Smp => "SMP",
        Mi => "MI",
        Mts => "MTs",
    }
);

option_set!(
    RencanaTingkat {
        Mts => "MTs",
        Ma => "MA",
    }
);

option_set!(
    RencanaProgram {
        Reguler => "Reguler",
        Tahfidz => "Tahfidz",
        TahfidzIntensif => "Tahfidz Intensif",
    }
);

option_set!(
    StatusOrangTua {
        Hidup => "Hidup",
        Meninggal => "Meninggal",
    }
);

option_set!(
    Pekerjaan {
        Petani => "Petani",
        Pedagang => "Pedagang",
        Pns => "PNS",
        Guru => "Guru",
        Wiraswasta => "Wiraswasta",
        Buruh => "Buruh",
        Nelayan => "Nelayan",
        TniPolri => "TNI/Polri",
        Dokter => "Dokter",
        KaryawanSwasta => "Karyawan Swasta",
        IbuRumahTangga => "Ibu Rumah Tangga",
        Pensiunan => "Pensiunan",
        Sopir => "Sopir",
        Tukang => "Tukang",
        TidakBekerja => "Tidak Bekerja",
    }
);

option_set!(
    Provinsi {
        JawaBarat => "Jawa Barat",
        JawaTengah => "Jawa Tengah",
        JawaTimur => "Jawa Timur",
        DkiJakarta => "DKI Jakarta",
        Banten => "Banten",
        DiyYogyakarta => "DIY Yogyakarta",
        Lampung => "Lampung",
        SumateraSelatan => "Sumatera Selatan",
    }
);

option_set!(
    Gelombang {
        Satu => "Gelombang 1",
        Dua => "Gelombang 2",
        Tiga => "Gelombang 3",
    }
);

option_set!(
    /// Review state of the uploaded documents. New records always start pending.
    StatusBerkas {
        Pending => "PENDING",
    }
);

/// One applicant row of the `pendaftar` table.
///
/// Field names follow Rust conventions; the serde renames are the column
/// names the table actually uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pendaftar {
    // Data calon santri
    #[serde(rename = "nikcalon")]
    pub nik_calon: String,
    pub nisn: String,
    #[serde(rename = "namalengkap")]
    pub nama_lengkap: String,
    #[serde(rename = "tempatlahir")]
    pub tempat_lahir: String,
    #[serde(rename = "tanggallahir")]
    pub tanggal_lahir: NaiveDate,
    #[serde(rename = "jeniskelamin")]
    pub jenis_kelamin: JenisKelamin,

    // Alamat
    #[serde(rename = "alamatjalan")]
    pub alamat_jalan: String,
    pub desa: String,
    pub kecamatan: String,
    #[serde(rename = "kotakabupaten")]
    pub kota_kabupaten: String,
    pub provinsi: Provinsi,

    // Pendidikan
    #[serde(rename = "ijazahformalterakhir")]
    pub ijazah_formal_terakhir: IjazahTerakhir,
    #[serde(rename = "rencanatingkat")]
    pub rencana_tingkat: RencanaTingkat,
    #[serde(rename = "rencanaprogram")]
    pub rencana_program: RencanaProgram,

    // Data ayah
    #[serde(rename = "namaayah")]
    pub nama_ayah: String,
    #[serde(rename = "nikayah")]
    pub nik_ayah: String,
    #[serde(rename = "statusayah")]
    pub status_ayah: StatusOrangTua,
    #[serde(rename = "pekerjaanayah")]
    pub pekerjaan_ayah: Pekerjaan,

    // Data ibu
    #[serde(rename = "namaibu")]
    pub nama_ibu: String,
    #[serde(rename = "nikibu")]
    pub nik_ibu: String,
    #[serde(rename = "statusibu")]
    pub status_ibu: StatusOrangTua,
    #[serde(rename = "pekerjaanibu")]
    pub pekerjaan_ibu: Pekerjaan,

    pub telepon_orang_tua: String,

    #[serde(rename = "statusberkas")]
    pub status_berkas: StatusBerkas,
    pub gelombang: Gelombang,
}

impl Pendaftar {
    /// Flattened `(column, value)` pairs in table order, for previews.
    pub fn columns(&self) -> Vec<(&'static str, String)> {
        vec![
            ("nikcalon", self.nik_calon.clone()),
            ("nisn", self.nisn.clone()),
            ("namalengkap", self.nama_lengkap.clone()),
            ("tempatlahir", self.tempat_lahir.clone()),
            ("tanggallahir", self.tanggal_lahir.format("%Y-%m-%d").to_string()),
            ("jeniskelamin", self.jenis_kelamin.to_string()),
            ("alamatjalan", self.alamat_jalan.clone()),
            ("desa", self.desa.clone()),
            ("kecamatan", self.kecamatan.clone()),
            ("kotakabupaten", self.kota_kabupaten.clone()),
            ("provinsi", self.provinsi.to_string()),
            ("ijazahformalterakhir", self.ijazah_formal_terakhir.to_string()),
            ("rencanatingkat", self.rencana_tingkat.to_string()),
            ("rencanaprogram", self.rencana_program.to_string()),
            ("namaayah", self.nama_ayah.clone()),
            ("nikayah", self.nik_ayah.clone()),
            ("statusayah", self.status_ayah.to_string()),
            ("pekerjaanayah", self.pekerjaan_ayah.to_string()),
            ("namaibu", self.nama_ibu.clone()),
            ("nikibu", self.nik_ibu.clone()),
            ("statusibu", self.status_ibu.to_string()),
            ("pekerjaanibu", self.pekerjaan_ibu.to_string()),
            ("telepon_orang_tua", self.telepon_orang_tua.clone()),
            ("statusberkas", self.status_berkas.to_string()),
            ("gelombang", self.gelombang.to_string()),
        ]
    }
}
