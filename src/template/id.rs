//! Indonesian content set for the seven material types.

use super::{DocumentBuilder, StructuredDocument};
use crate::job::models::{Audience, JobMetadata, Level, Tone, TrainingContext};
use crate::material::models::MaterialType;

pub fn generate(material_type: MaterialType, meta: &JobMetadata) -> StructuredDocument {
    match material_type {
        MaterialType::Foundation => foundation(meta),
        MaterialType::Slides => slides(meta),
        MaterialType::Facilitator => facilitator(meta),
        MaterialType::Participant => participant(meta),
        MaterialType::Activities => activities(meta),
        MaterialType::Evaluation => evaluation(meta),
        MaterialType::Resources => resources(meta),
    }
}

fn level_word(level: Level) -> &'static str {
    match level {
        Level::Beginner => "pemula",
        Level::Intermediate => "menengah",
        Level::Advanced => "lanjutan",
    }
}

fn audience_word(audience: Audience) -> &'static str {
    match audience {
        Audience::Managers => "para manajer",
        Audience::Employees => "para karyawan",
        Audience::Students => "para mahasiswa",
        Audience::Trainers => "para pelatih",
        Audience::General => "peserta umum",
    }
}

fn tone_word(tone: Tone) -> &'static str {
    match tone {
        Tone::Professional => "profesional",
        Tone::Friendly => "bersahabat",
        Tone::Academic => "akademis",
        Tone::Casual => "santai",
    }
}

fn context_word(context: TrainingContext) -> &'static str {
    match context {
        TrainingContext::Corporate => "korporat",
        TrainingContext::Academic => "akademik",
        TrainingContext::Community => "komunitas",
        TrainingContext::Online => "daring",
    }
}

fn foundation(meta: &JobMetadata) -> StructuredDocument {
    let level = level_word(meta.level);
    let audience = audience_word(meta.audience);
    let context = context_word(meta.context);
    DocumentBuilder::new()
        .h1(format!("{}: Fondasi & Agenda Pelatihan", meta.subject))
        .p(format!(
            "Pelatihan {} tingkat {} tentang {} yang dirancang untuk {} di \
             lingkungan {}, disampaikan dengan gaya {} selama {}.",
            context,
            level,
            meta.subject,
            audience,
            context,
            tone_word(meta.tone),
            meta.duration
        ))
        .h2("Tujuan Pembelajaran")
        .bullet(format!(
            "Menjelaskan konsep inti {} pada tingkat {}.",
            meta.subject, level
        ))
        .bullet(format!(
            "Menerapkan teknik {} pada situasi yang dihadapi {} sehari-hari.",
            meta.subject, audience
        ))
        .bullet(format!(
            "Menilai kemajuan pribadi terhadap capaian tingkat {}.",
            level
        ))
        .h2("Agenda")
        .bullet(format!("Pembukaan dan perkenalan (total {})", meta.duration))
        .bullet(format!("Modul 1: Dasar-dasar {}", meta.subject))
        .bullet(format!("Modul 2: {} dalam praktik", meta.subject))
        .bullet("Modul 3: Aktivitas kelompok dan diskusi".to_string())
        .bullet("Penutup, evaluasi dan tindak lanjut".to_string())
        .h2("Profil Peserta")
        .p(format!(
            "Pelatihan ini mengasumsikan {} berada di tingkat {}, tanpa \
             prasyarat lain selain minat terhadap {}.",
            audience, level, meta.subject
        ))
        .build()
}

fn slides(meta: &JobMetadata) -> StructuredDocument {
    let audience = audience_word(meta.audience);
    DocumentBuilder::new()
        .h1(format!("{} — Salindia Presentasi", meta.subject))
        .p(format!(
            "Salindia untuk sesi {} tentang {}, ditulis dengan gaya {} untuk {}.",
            meta.duration,
            meta.subject,
            tone_word(meta.tone),
            audience
        ))
        .h1(format!("Mengapa {} Penting", meta.subject))
        .bullet(format!(
            "Peran {} dalam lingkungan {}",
            meta.subject,
            context_word(meta.context)
        ))
        .bullet(format!("Manfaat penguasaannya bagi {}", audience))
        .h1("Konsep Inti")
        .bullet(format!(
            "Istilah kunci {} pada tingkat {}",
            meta.subject,
            level_word(meta.level)
        ))
        .bullet("Kesalahan umum dan cara menghindarinya".to_string())
        .h1("Penerapan dalam Praktik")
        .bullet(format!(
            "Skenario terapan dari kehidupan {}",
            context_word(meta.context)
        ))
        .bullet("Bahan diskusi untuk kelompok".to_string())
        .h1("Rangkuman & Tindak Lanjut")
        .bullet("Ulasan kembali tujuan pembelajaran".to_string())
        .bullet(format!("Sumber untuk mendalami {}", meta.subject))
        .build()
}

fn facilitator(meta: &JobMetadata) -> StructuredDocument {
    let audience = audience_word(meta.audience);
    DocumentBuilder::new()
        .h1(format!("Panduan Fasilitator: {}", meta.subject))
        .p(format!(
            "Cara membawakan pelatihan tingkat {} ini untuk {}. Pertahankan \
             gaya {}; seluruh sesi selesai dalam {}.",
            level_word(meta.level),
            audience,
            tone_word(meta.tone),
            meta.duration
        ))
        .h2("Sebelum Sesi")
        .bullet("Pelajari salindia dan panduan peserta.".to_string())
        .bullet(format!(
            "Sesuaikan contoh {} dengan konteks {} kelompok Anda.",
            meta.subject,
            context_word(meta.context)
        ))
        .bullet("Siapkan lembar aktivitas dan formulir evaluasi.".to_string())
        .h2("Alur Sesi")
        .bullet(format!(
            "Buka dengan alasan pentingnya {} bagi {} (10% waktu).",
            meta.subject, audience
        ))
        .bullet("Sampaikan konsep inti dengan salindia (40%).".to_string())
        .bullet("Jalankan aktivitas kelompok (35%).".to_string())
        .bullet("Tutup dengan evaluasi dan tindak lanjut (15%).".to_string())
        .h2("Catatan Fasilitasi")
        .p(format!(
            "Peserta tingkat {} biasanya meminta contoh konkret; siapkan \
             cerita {} dari lingkungan {}.",
            level_word(meta.level),
            meta.subject,
            context_word(meta.context)
        ))
        .build()
}

fn participant(meta: &JobMetadata) -> StructuredDocument {
    DocumentBuilder::new()
        .h1(format!("Panduan Peserta: {}", meta.subject))
        .p(format!(
            "Selamat datang! Selama {} ke depan Anda akan membangun \
             keterampilan {} tingkat {} melalui pelajaran singkat, latihan \
             dan kerja kelompok.",
            meta.duration,
            meta.subject,
            level_word(meta.level)
        ))
        .h2("Yang Akan Anda Pelajari")
        .bullet(format!("Kosakata dan gagasan inti {}.", meta.subject))
        .bullet(format!(
            "Teknik praktis yang langsung dapat dipakai oleh {}.",
            audience_word(meta.audience)
        ))
        .bullet("Cara terus berkembang setelah pelatihan berakhir.".to_string())
        .h2("Cara Menggunakan Panduan Ini")
        .p(format!(
            "Setiap bagian mengikuti modul sesi. Tersedia ruang untuk catatan \
             pribadi; gaya bahasa sengaja dibuat {} agar selaras dengan \
             sesinya.",
            tone_word(meta.tone)
        ))
        .h2("Poin Kunci")
        .bullet(format!(
            "{} adalah keterampilan — ia membaik dengan latihan yang disengaja.",
            meta.subject
        ))
        .bullet(format!(
            "Skenario {} dalam aktivitas adalah tempat aman untuk gagal.",
            context_word(meta.context)
        ))
        .bullet("Umpan balik evaluasi Anda membentuk edisi pelatihan berikutnya.".to_string())
        .build()
}

fn activities(meta: &JobMetadata) -> StructuredDocument {
    let audience = audience_word(meta.audience);
    DocumentBuilder::new()
        .h1(format!("Aktivitas Kelompok: {}", meta.subject))
        .p(format!(
            "Tiga latihan untuk sesi berdurasi {}, disesuaikan bagi {} pada \
             tingkat {}.",
            meta.duration,
            audience,
            level_word(meta.level)
        ))
        .h2("Aktivitas 1: Pemanasan Berpasangan")
        .p(format!(
            "Secara berpasangan, ceritakan satu situasi nyata ketika {} tidak \
             berjalan baik di lingkungan {}. Lima menit per orang.",
            meta.subject,
            context_word(meta.context)
        ))
        .h2("Aktivitas 2: Bermain Peran")
        .p(format!(
            "Kelompok kecil memerankan skenario {}; satu pengamat per kelompok \
             mencatat teknik {} yang muncul.",
            context_word(meta.context),
            meta.subject
        ))
        .bullet("Bergiliran peran agar semua pernah menjadi pengamat.".to_string())
        .bullet("Bahas bersama; jaga umpan balik tetap membangun.".to_string())
        .h2("Aktivitas 3: Rencana Aksi")
        .p(format!(
            "Setiap peserta menulis tiga cara menerapkan {} dalam pekerjaannya \
             selama sebulan ke depan, dengan gaya {} yang sama seperti materi \
             pelatihan.",
            meta.subject,
            tone_word(meta.tone)
        ))
        .build()
}

fn evaluation(meta: &JobMetadata) -> StructuredDocument {
    DocumentBuilder::new()
        .h1(format!("Evaluasi Pelatihan: {}", meta.subject))
        .p(format!(
            "Diisi di akhir sesi {} untuk mengukur tercapainya tujuan tingkat \
             {} bagi {}.",
            meta.duration,
            level_word(meta.level),
            audience_word(meta.audience)
        ))
        .h2("Uji Pemahaman")
        .bullet(format!("Sebutkan tiga konsep inti {}.", meta.subject))
        .bullet(format!(
            "Jelaskan satu teknik {} yang Anda latih hari ini dan kapan akan \
             digunakan.",
            meta.subject
        ))
        .bullet(format!(
            "Skenario {} mana dari aktivitas yang paling realistis, dan mengapa?",
            context_word(meta.context)
        ))
        .h2("Umpan Balik Sesi")
        .bullet("Nilai tempo sesi (1-5).".to_string())
        .bullet(format!(
            "Apakah gaya {} sesuai dengan tempat kerja Anda? (ya/tidak)",
            tone_word(meta.tone)
        ))
        .bullet("Apa yang sebaiknya diubah fasilitator di sesi berikutnya?".to_string())
        .build()
}

fn resources(meta: &JobMetadata) -> StructuredDocument {
    DocumentBuilder::new()
        .h1(format!("Sumber Lanjutan: {}", meta.subject))
        .p(format!(
            "Materi tindak lanjut pilihan bagi {} yang telah menyelesaikan \
             pelatihan tingkat {} dan ingin melampaui sesi {} ini.",
            audience_word(meta.audience),
            level_word(meta.level),
            meta.duration
        ))
        .h2("Mendalami Teori")
        .bullet(format!(
            "Bacaan dasar tentang {} yang cocok untuk pembelajar tingkat {}.",
            meta.subject,
            level_word(meta.level)
        ))
        .bullet(format!(
            "Studi kasus penerapan {} di organisasi {}.",
            meta.subject,
            context_word(meta.context)
        ))
        .h2("Terus Berlatih")
        .bullet("Kelompok latihan sebaya - ulangi bermain peran bersama rekan.".to_string())
        .bullet(format!(
            "Jurnal bergaya {}: catat satu keputusan {} per minggu dan tinjau \
             setiap bulan.",
            tone_word(meta.tone),
            meta.subject
        ))
        .build()
}
