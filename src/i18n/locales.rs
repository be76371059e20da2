//! Locale identifiers: validity checks and display names.

use std::collections::{
    HashMap,
    HashSet,
};
use std::sync::LazyLock;

/// Locale used whenever a requested code is unknown.
pub const DEFAULT_LOCALE: &str = "en";

/// RFC 5646 language codes, stored in normalized (lowercase, underscore) form.
/// Based on <http://tools.ietf.org/html/rfc5646>
static KNOWN_LOCALES: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "af", "af_za", "ar", "ar_ae", "ar_bh", "ar_dz", "ar_eg", "ar_iq", "ar_jo", "ar_kw",
        "ar_lb", "ar_ly", "ar_ma", "ar_om", "ar_qa", "ar_sa", "ar_sy", "ar_tn", "ar_ye", "az",
        "az_az", "az_cyrl_az", "be", "be_by", "bg", "bg_bg", "bs_ba", "ca", "ca_es", "cs",
        "cs_cz", "cy", "cy_gb", "da", "da_dk", "de", "de_at", "de_ch", "de_de", "de_li", "de_lu",
        "dv", "dv_mv", "el", "el_gr", "en", "en_au", "en_bz", "en_ca", "en_cb", "en_gb", "en_ie",
        "en_jm", "en_nz", "en_ph", "en_tt", "en_us", "en_za", "en_zw", "eo", "es", "es_ar",
        "es_bo", "es_cl", "es_co", "es_cr", "es_do", "es_ec", "es_es", "es_gt", "es_hn", "es_mx",
        "es_ni", "es_pa", "es_pe", "es_pr", "es_py", "es_sv", "es_uy", "es_ve", "et", "et_ee",
        "eu", "eu_es", "fa", "fa_ir", "fi", "fi_fi", "fo", "fo_fo", "fr", "fr_be", "fr_ca",
        "fr_ch", "fr_fr", "fr_lu", "fr_mc", "gl", "gl_es", "gu", "gu_in", "he", "he_il", "hi",
        "hi_in", "hr", "hr_ba", "hr_hr", "hu", "hu_hu", "hy", "hy_am", "id", "id_id", "is",
        "is_is", "it", "it_ch", "it_it", "ja", "ja_jp", "ka", "ka_ge", "kk", "kk_kz", "kn",
        "kn_in", "ko", "ko_kr", "kok", "kok_in", "ky", "ky_kg", "lt", "lt_lt", "lv", "lv_lv",
        "mi", "mi_nz", "mk", "mk_mk", "mn", "mn_mn", "mr", "mr_in", "ms", "ms_bn", "ms_my", "mt",
        "mt_mt", "nb", "nb_no", "nl", "nl_be", "nl_nl", "nn_no", "ns", "ns_za", "pa", "pa_in",
        "pl", "pl_pl", "ps", "ps_ar", "pt", "pt_br", "pt_pt", "qu", "qu_bo", "qu_ec", "qu_pe",
        "ro", "ro_ro", "ru", "ru_ru", "sa", "sa_in", "se", "se_fi", "se_no", "se_se", "sk",
        "sk_sk", "sl", "sl_si", "sq", "sq_al", "sr_ba", "sr_cyrl_ba", "sr_cyrl_sp", "sr_sp",
        "sv", "sv_fi", "sv_se", "sw", "sw_ke", "syr", "syr_sy", "ta", "ta_in", "te", "te_in",
        "th", "th_th", "tl", "tl_ph", "tn", "tn_za", "tr", "tr_tr", "ts", "tt", "tt_ru", "uk",
        "uk_ua", "ur", "ur_pk", "uz", "uz_cyrl_uz", "uz_uz", "vi", "vi_vn", "xh", "xh_za", "zh",
        "zh_cn", "zh_hk", "zh_mo", "zh_sg", "zh_tw", "zu", "zu_za",
    ]
    .into_iter()
    .collect()
});

/// Display names of languages, keyed by the language the reader sees them in.
///
/// Every inner table covers the same set of language codes; lookups for other
/// valid locales fall back to the English table and finally to English itself.
static DISPLAY_NAMES: LazyLock<HashMap<&'static str, HashMap<&'static str, &'static str>>> =
    LazyLock::new(|| {
        let en = [
            ("de", "German"),
            ("en", "English"),
            ("es", "Spanish"),
            ("fr", "French"),
            ("it", "Italian"),
            ("ja", "Japanese"),
            ("ko", "Korean"),
            ("nl", "Dutch"),
            ("pl", "Polish"),
            ("pt", "Portuguese"),
            ("ru", "Russian"),
            ("zh", "Chinese"),
        ];
        let es = [
            ("de", "Alemán"),
            ("en", "Inglés"),
            ("es", "Español"),
            ("fr", "Francés"),
            ("it", "Italiano"),
            ("ja", "Japonés"),
            ("ko", "Coreano"),
            ("nl", "Neerlandés"),
            ("pl", "Polaco"),
            ("pt", "Portugués"),
            ("ru", "Ruso"),
            ("zh", "Chino"),
        ];
        let fr = [
            ("de", "Allemand"),
            ("en", "Anglais"),
            ("es", "Espagnol"),
            ("fr", "Français"),
            ("it", "Italien"),
            ("ja", "Japonais"),
            ("ko", "Coréen"),
            ("nl", "Néerlandais"),
            ("pl", "Polonais"),
            ("pt", "Portugais"),
            ("ru", "Russe"),
            ("zh", "Chinois"),
        ];
        let de = [
            ("de", "Deutsch"),
            ("en", "Englisch"),
            ("es", "Spanisch"),
            ("fr", "Französisch"),
            ("it", "Italienisch"),
            ("ja", "Japanisch"),
            ("ko", "Koreanisch"),
            ("nl", "Niederländisch"),
            ("pl", "Polnisch"),
            ("pt", "Portugiesisch"),
            ("ru", "Russisch"),
            ("zh", "Chinesisch"),
        ];
        let ja = [
            ("de", "ドイツ語"),
            ("en", "英語"),
            ("es", "スペイン語"),
            ("fr", "フランス語"),
            ("it", "イタリア語"),
            ("ja", "日本語"),
            ("ko", "韓国語"),
            ("nl", "オランダ語"),
            ("pl", "ポーランド語"),
            ("pt", "ポルトガル語"),
            ("ru", "ロシア語"),
            ("zh", "中国語"),
        ];
        HashMap::from([
            ("en", HashMap::from(en)),
            ("es", HashMap::from(es)),
            ("fr", HashMap::from(fr)),
            ("de", HashMap::from(de)),
            ("ja", HashMap::from(ja)),
        ])
    });

/// Normalize a locale code (lowercase and replace - with _).
#[must_use]
pub fn normalize_locale_code(code: &str) -> String {
    code.to_lowercase().replace('-', "_")
}

/// The bare language part of a locale code (`es_CO` -> `es`).
fn language_part(code: &str) -> String {
    let normalized = normalize_locale_code(code);
    normalized.split('_').next().unwrap_or(&normalized).to_string()
}

/// Whether a locale code names a known language, optionally with a region.
#[must_use]
pub fn is_valid_locale(locale: &str) -> bool {
    KNOWN_LOCALES.contains(normalize_locale_code(locale).as_str())
}

/// Display name of `code`, rendered in the language of `display_locale`.
///
/// Unknown codes on either side fall back to [`DEFAULT_LOCALE`], so the
/// worst case answer is always "English" rather than an error.
#[must_use]
pub fn display_name(code: &str, display_locale: &str) -> String {
    let code = if is_valid_locale(code) { code } else { DEFAULT_LOCALE };
    let display_locale =
        if is_valid_locale(display_locale) { display_locale } else { DEFAULT_LOCALE };

    let table = DISPLAY_NAMES
        .get(language_part(display_locale).as_str())
        .or_else(|| DISPLAY_NAMES.get(DEFAULT_LOCALE));

    let language = language_part(code);
    table
        .and_then(|table| table.get(language.as_str()).or_else(|| table.get(DEFAULT_LOCALE)))
        .copied()
        .unwrap_or("English")
        .to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("en")]
    #[case("es")]
    #[case("es_CO")]
    #[case("es-CO")]
    #[case("pt_BR")]
    fn valid_locales_are_accepted(#[case] locale: &str) {
        assert!(is_valid_locale(locale));
    }

    #[rstest]
    #[case("bar")]
    #[case("foo_SPAM")]
    #[case("")]
    #[case("default")]
    fn invalid_locales_are_rejected(#[case] locale: &str) {
        assert!(!is_valid_locale(locale));
    }

    #[googletest::test]
    fn normalize_lowercases_and_underscores() {
        expect_that!(normalize_locale_code("es-CO"), eq("es_co"));
        expect_that!(normalize_locale_code("EN"), eq("en"));
    }

    #[rstest]
    #[case("en", "en", "English")]
    #[case("en", "es", "Inglés")]
    #[case("en", "es_CO", "Inglés")]
    #[case("en", "fr", "Anglais")]
    #[case("es", "en", "Spanish")]
    #[case("fr", "en", "French")]
    fn display_name_known_pairs(#[case] code: &str, #[case] display: &str, #[case] expected: &str) {
        assert_eq!(display_name(code, display), expected);
    }

    #[rstest]
    #[case("en", "foo")]
    #[case("foo", "en")]
    #[case("foo", "bar")]
    fn display_name_falls_back_to_english(#[case] code: &str, #[case] display: &str) {
        assert_eq!(display_name(code, display), "English");
    }

    #[googletest::test]
    fn display_name_region_uses_language_table() {
        // The display table is per language, regions share it.
        expect_that!(display_name("es_CO", "es"), eq("Español"));
        expect_that!(display_name("es_CO", "en"), eq("Spanish"));
    }
}
