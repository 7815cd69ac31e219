//! Indonesian vocabularies used to build names, places and phone numbers.

pub const MALE_GIVEN_NAMES: &[&str] = &[
    "Ahmad", "Muhammad", "Budi", "Agus", "Rizki", "Fajar", "Hendra", "Dimas", "Yusuf",
    "Ilham", "Arif", "Bayu", "Eko", "Fikri", "Galih", "Hafidz", "Irfan", "Joko", "Kurniawan",
    "Lukman", "Nanda", "Rafi", "Satria", "Taufik", "Umar", "Wahyu", "Zaki", "Hasan", "Iqbal",
    "Rahmat",
];

pub const FEMALE_GIVEN_NAMES: &[&str] = &[
    "Siti", "Aisyah", "Dewi", "Putri", "Nur", "Fitri", "Rina", "Ayu", "Indah", "Lestari",
    "Nabila", "Zahra", "Khadijah", "Fatimah", "Salsabila", "Annisa", "Wulan", "Maya", "Rahma",
    "Intan", "Kartika", "Mega", "Nadia", "Puspita", "Ratna", "Sari", "Tiara", "Yuliana",
    "Hana", "Laila",
];

pub const MALE_FAMILY_NAMES: &[&str] = &[
    "Santoso", "Wijaya", "Saputra", "Nugroho", "Pratama", "Setiawan", "Hidayat", "Gunawan",
    "Firmansyah", "Kusuma", "Ramadhan", "Siregar", "Nasution", "Harahap", "Prasetyo",
    "Susanto", "Hakim", "Maulana", "Syahputra", "Permana",
];

pub const FEMALE_FAMILY_NAMES: &[&str] = &[
    "Lestari", "Wulandari", "Rahmawati", "Puspitasari", "Handayani", "Kurniasih", "Safitri",
    "Anggraini", "Maharani", "Purnamasari", "Susanti", "Hartati", "Utami", "Permatasari",
    "Novitasari", "Fitriani", "Rahayu", "Yulianti", "Suryani", "Nurhaliza",
];

pub const CITIES: &[&str] = &[
    "Bandung", "Bekasi", "Bogor", "Cirebon", "Depok", "Garut", "Sukabumi", "Tasikmalaya",
    "Semarang", "Solo", "Magelang", "Pekalongan", "Tegal", "Kudus", "Surabaya", "Malang",
    "Kediri", "Jember", "Madiun", "Blitar", "Serang", "Tangerang", "Cilegon", "Yogyakarta",
    "Sleman", "Bantul", "Bandar Lampung", "Metro", "Palembang", "Lubuklinggau",
];

pub const STREET_PREFIXES: &[&str] = &["Jl.", "Jalan", "Gg.", "Gang"];

pub const STREET_NAMES: &[&str] = &[
    "Merdeka", "Sudirman", "Diponegoro", "Gatot Subroto", "Pahlawan", "Ahmad Yani",
    "Kartini", "Cendana", "Melati", "Mawar", "Kenanga", "Anggrek", "Veteran", "Pemuda",
    "Pattimura", "Imam Bonjol", "Hayam Wuruk", "Gajah Mada", "Pasar Baru", "Raya Bogor",
    "Cempaka", "Flamboyan", "Kebon Jeruk", "Siliwangi", "Pramuka",
];

pub const VILLAGE_PREFIXES: &[&str] = &["Desa", "Dusun", "Kampung", "Kelurahan"];

pub const PHONE_PREFIXES: &[&str] = &[
    "0812", "0813", "0852", "0853", "0821", "0822", "0857", "0858",
];
