// src/core/locale.rs

//! Two-language string catalog.
//!
//! The current `Locale` is owned by the application state and passed to every
//! lookup; the `Catalog` itself is immutable once built.

use rust_i18n::{Backend, SimpleBackend};
use std::collections::HashMap;
use strum::{Display, EnumIter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumIter)]
pub enum Locale {
    #[default]
    #[strum(serialize = "en")]
    En,
    #[strum(serialize = "ar")]
    Ar,
}

impl Locale {
    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Ar => "ar",
        }
    }

    /// Label shown on the locale switch.
    pub fn badge(self) -> &'static str {
        match self {
            Locale::En => "EN",
            Locale::Ar => "ع",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Locale::En => Locale::Ar,
            Locale::Ar => Locale::En,
        }
    }

    pub fn is_rtl(self) -> bool {
        matches!(self, Locale::Ar)
    }
}

static EN: &[(&str, &str)] = &[
    ("cyber.threat.analysis", "Cyber Threat Analysis"),
    ("advanced.security.scanning", "Advanced security scanning for URLs, IP addresses, and files. Protect your digital assets with real-time threat detection."),
    ("real.time.analysis", "Real-time Analysis"),
    ("advanced.detection", "Advanced Detection"),
    ("secure.processing", "Secure Processing"),
    ("url.scanner", "URL Scanner"),
    ("ip.scanner", "IP Scanner"),
    ("file.scanner", "File Scanner"),
    ("enter.url", "Enter URL to analyze"),
    ("enter.ip", "Enter IP address to analyze"),
    ("enter.file", "Enter the path of a file to analyze"),
    ("scan.now", "Scan Now"),
    ("scanning", "Scanning..."),
    ("upload.file", "Upload File"),
    ("drag.drop.files", "Drag and drop files here, or click to select"),
    ("supported.formats", "Supported formats: PDF, DOC, DOCX, TXT (Max 10MB)"),
    ("threat.analysis.results", "Threat Analysis Results"),
    ("clean", "Clean"),
    ("malicious", "Malicious"),
    ("suspicious", "Suspicious"),
    ("harmless", "Harmless"),
    ("undetected", "Undetected"),
    ("detected.threats", "Detected Threats"),
    ("analysis.date", "Analysis Date"),
    ("view.full.report", "View Full Report"),
    ("powered.by", "Powered by advanced AI and machine learning algorithms for comprehensive security analysis"),
    ("language", "Language"),
    ("safety.score", "Safety Score"),
    ("analysis.id", "Analysis ID"),
    ("scanned.url", "Scanned URL"),
    ("engine.results", "Engine Results"),
    ("ip.address", "IP Address"),
    ("country", "Country"),
    ("isp", "ISP"),
    ("usage", "Usage"),
    ("domain", "Domain"),
    ("public.ip", "Public IP"),
    ("tor.exit", "TOR Exit"),
    ("reports", "Reports"),
    ("users", "Users"),
    ("ip.version", "Version"),
    ("last.report", "Last Report"),
    ("whitelisted", "Whitelisted"),
    ("hostnames", "Associated Hostnames"),
    ("location.network", "Location & Network"),
    ("security.information", "Security Information"),
    ("abuse.confidence", "Abuse Confidence"),
    ("file.name", "File"),
    ("file.size", "Size"),
    ("results.placeholder", "Scan results will appear here..."),
    ("footer.idle", "Enter: scan  Tab: switch scanner  F2: language  Ctrl+C: quit"),
    ("footer.scanning", "Scanning... Tab: cancel and switch  Ctrl+C: quit"),
    ("footer.finished", "Ctrl+N: new scan  Up/Down: scroll  Tab: switch scanner  F2: language  Ctrl+C: quit"),
    ("dismiss.hint", "Press Esc to dismiss"),
    ("yes", "Yes"),
    ("no", "No"),
];

static AR: &[(&str, &str)] = &[
    ("cyber.threat.analysis", "تحليل التهديدات السيبرانية"),
    ("advanced.security.scanning", "فحص أمني متقدم للروابط وعناوين IP والملفات. احمِ أصولك الرقمية بكشف التهديدات في الوقت الفعلي."),
    ("real.time.analysis", "تحليل في الوقت الفعلي"),
    ("advanced.detection", "كشف متقدم"),
    ("secure.processing", "معالجة آمنة"),
    ("url.scanner", "فاحص الروابط"),
    ("ip.scanner", "فاحص عناوين IP"),
    ("file.scanner", "فاحص الملفات"),
    ("enter.url", "أدخل الرابط للتحليل"),
    ("enter.ip", "أدخل عنوان IP للتحليل"),
    ("enter.file", "أدخل مسار الملف للتحليل"),
    ("scan.now", "فحص الآن"),
    ("scanning", "جاري الفحص..."),
    ("upload.file", "رفع ملف"),
    ("drag.drop.files", "اسحب وأفلت الملفات هنا، أو انقر للاختيار"),
    ("supported.formats", "الصيغ المدعومة: PDF, DOC, DOCX, TXT (حد أقصى 10 ميجا)"),
    ("threat.analysis.results", "نتائج تحليل التهديدات"),
    ("clean", "نظيف"),
    ("malicious", "ضار"),
    ("suspicious", "مشبوه"),
    ("harmless", "غير ضار"),
    ("undetected", "غير مكتشف"),
    ("detected.threats", "التهديدات المكتشفة"),
    ("analysis.date", "تاريخ التحليل"),
    ("view.full.report", "عرض التقرير الكامل"),
    ("powered.by", "مدعوم بخوارزميات الذكاء الاصطناعي والتعلم الآلي المتقدمة للتحليل الأمني الشامل"),
    ("language", "اللغة"),
    ("safety.score", "درجة الأمان"),
    ("analysis.id", "معرف التحليل"),
    ("scanned.url", "الرابط المفحوص"),
    ("engine.results", "نتائج المحركات"),
    ("ip.address", "عنوان IP"),
    ("country", "الدولة"),
    ("isp", "مزود الخدمة"),
    ("usage", "الاستخدام"),
    ("domain", "النطاق"),
    ("public.ip", "عنوان عام"),
    ("tor.exit", "مخرج TOR"),
    ("reports", "البلاغات"),
    ("users", "المستخدمون"),
    ("ip.version", "الإصدار"),
    ("last.report", "آخر بلاغ"),
    ("whitelisted", "في القائمة البيضاء"),
    ("hostnames", "أسماء المضيف المرتبطة"),
    ("location.network", "الموقع والشبكة"),
    ("security.information", "معلومات الأمان"),
    ("abuse.confidence", "درجة إساءة الاستخدام"),
    ("file.name", "الملف"),
    ("file.size", "الحجم"),
    ("results.placeholder", "ستظهر نتائج الفحص هنا..."),
    ("footer.idle", "Enter: فحص  Tab: تبديل الفاحص  F2: اللغة  Ctrl+C: خروج"),
    ("footer.scanning", "جاري الفحص... Tab: إلغاء وتبديل  Ctrl+C: خروج"),
    ("footer.finished", "Ctrl+N: فحص جديد  Up/Down: تمرير  Tab: تبديل الفاحص  F2: اللغة  Ctrl+C: خروج"),
    ("dismiss.hint", "اضغط Esc للإغلاق"),
    ("yes", "نعم"),
    ("no", "لا"),
];

/// Key -> string tables for every supported locale.
pub struct Catalog {
    backend: SimpleBackend,
}

impl Catalog {
    pub fn new() -> Self {
        let mut backend = SimpleBackend::new();
        for (locale, table) in [(Locale::En, EN), (Locale::Ar, AR)] {
            let entries: HashMap<&str, &str> = table.iter().copied().collect();
            backend.add_translations(locale.code(), &entries);
        }
        Self { backend }
    }

    /// Looks `key` up for `locale`. Unknown keys come back unchanged.
    pub fn t(&self, locale: Locale, key: &str) -> String {
        self.backend
            .translate(locale.code(), key)
            .map(|s| s.to_string())
            .unwrap_or_else(|| key.to_string())
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn translates_per_locale() {
        let catalog = Catalog::new();
        assert_eq!(catalog.t(Locale::En, "scan.now"), "Scan Now");
        assert_eq!(catalog.t(Locale::Ar, "scan.now"), "فحص الآن");
    }

    #[test]
    fn missing_key_falls_back_to_key() {
        let catalog = Catalog::new();
        assert_eq!(catalog.t(Locale::En, "no.such.key"), "no.such.key");
        assert_eq!(catalog.t(Locale::Ar, "no.such.key"), "no.such.key");
    }

    #[test]
    fn both_tables_cover_the_same_keys() {
        let en: HashSet<&str> = EN.iter().map(|(k, _)| *k).collect();
        let ar: HashSet<&str> = AR.iter().map(|(k, _)| *k).collect();
        assert_eq!(en, ar);
        assert_eq!(en.len(), EN.len());
    }

    #[test]
    fn toggle_switches_between_the_two_locales() {
        assert_eq!(Locale::default(), Locale::En);
        assert_eq!(Locale::En.toggle(), Locale::Ar);
        assert_eq!(Locale::Ar.toggle().toggle(), Locale::Ar);
        assert!(Locale::Ar.is_rtl());
    }
}
