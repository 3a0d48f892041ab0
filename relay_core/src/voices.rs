//! Static voice catalog for the upstream provider.

use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Voice {
    pub id: &'static str,
    pub name: &'static str,
    pub lang: &'static str,
    pub gender: &'static str,
}

const fn voice(id: &'static str, name: &'static str, lang: &'static str, gender: &'static str) -> Voice {
    Voice { id, name, lang, gender }
}

pub const VOICES: &[Voice] = &[
    // Chinese
    voice("zh_female_wanwanxiaohe_moon_bigtts", "Isabella (Taiwanese - Vivid)", "zh", "Female"),
    voice("zh_male_guozhoudege_moon_bigtts", "Andrew (Cantonese - Clear)", "zh", "Male"),
    voice("zh_female_gaolengyujie_moon_bigtts", "Charlotte (Clear)", "zh", "Female"),
    voice("zh_female_wanqudashu_moon_bigtts", "Robert (Cantonese - Fun)", "zh", "Male"),
    voice("zh_male_jingqiangkanye_moon_bigtts", "Thomas (Beijing - Fun)", "zh", "Male"),
    voice("zh_male_wennuanahu_moon_bigtts", "Mark (Warm)", "zh", "Male"),
    voice("zh_female_linjianvhai_moon_bigtts", "Lila (Clear)", "zh", "Female"),
    voice("zh_male_shaonianzixin_moon_bigtts", "Ethan (Clear)", "zh", "Male"),
    voice("zh_male_yuanboxiaoshu_moon_bigtts", "Joseph (Deep)", "zh", "Male"),
    voice("zh_female_daimengchuanmei_moon_bigtts", "Elena (Sichuan - Cute)", "zh", "Female"),
    voice("zh_male_yangguangqingnian_moon_bigtts", "George (Clear)", "zh", "Male"),
    voice("zh_female_shuangkuaisisi_moon_bigtts", "Aria (Vivid)", "zh", "Female"),
    voice("zh_male_baqiqingshu_mars_bigtts", "Edward (Audio Book - Deep)", "zh", "Male"),
    voice("zh_female_wenroushunv_mars_bigtts", "Emma (Audio Book - Soft)", "zh", "Female"),
    voice("zh_female_shaoergushi_mars_bigtts", "Tina (Dubbing - Vivid)", "zh", "Female"),
    voice("zh_male_silang_mars_bigtts", "William (Dubbing - Deep)", "zh", "Male"),
    voice("zh_male_jieshuonansheng_mars_bigtts", "James (Dubbing - Clear)", "zh", "Male"),
    voice("zh_female_jitangmeimei_mars_bigtts", "Grace (Dubbing - Soft)", "zh", "Female"),
    voice("zh_female_tiexinnvsheng_mars_bigtts", "Sophia (Dubbing - Warm)", "zh", "Female"),
    voice("zh_female_qiaopinvsheng_mars_bigtts", "Mia (Dubbing - Vivid)", "zh", "Female"),
    voice("zh_female_mengyatou_mars_bigtts", "Ava (Dubbing - Vivid)", "zh", "Female"),
    voice("zh_female_cancan_mars_bigtts", "Luna (General - Clear)", "zh", "Female"),
    voice("zh_female_qingxinnvsheng_mars_bigtts", "Olivia (General - Clear)", "zh", "Female"),
    voice("zh_female_linjia_mars_bigtts", "Lily (General - Vivid)", "zh", "Female"),
    // English
    voice("en_female_anna_mars_bigtts", "Anna (Soft)", "en", "Female"),
    voice("en_male_adam_mars_bigtts", "Adam (American - Clear)", "en", "Male"),
    voice("en_female_sarah_mars_bigtts", "Sarah (Australian - Soft)", "en", "Female"),
    voice("en_male_dryw_mars_bigtts", "Dryw (Australian - Deep)", "en", "Male"),
    voice("en_male_smith_mars_bigtts", "Smith (British - Deep)", "en", "Male"),
    // Japanese
    voice("multi_male_jingqiangkanye_moon_bigtts", "Kazune (Fun)", "ja", "Male"),
    voice("multi_female_shuangkuaisisi_moon_bigtts", "Haruko (Vivid)", "ja", "Female"),
    voice("multi_female_gaolengyujie_moon_bigtts", "Akemi (Clear)", "ja", "Female"),
    voice("multi_male_wanqudashu_moon_bigtts", "Hiroshi (Fun)", "ja", "Male"),
    // Spanish (multilingual voices double up across ja/es)
    voice("multi_male_jingqiangkanye_moon_bigtts", "Mateo (Fun)", "es", "Male"),
    voice("multi_female_shuangkuaisisi_moon_bigtts", "Isabella (Vivid)", "es", "Female"),
    voice("multi_male_wanqudashu_moon_bigtts", "Alejandro (Fun)", "es", "Male"),
];

/// Looks up a voice by provider id. First match wins for the multilingual
/// ids that appear under more than one language.
pub fn find(id: &str) -> Option<&'static Voice> {
    VOICES.iter().find(|v| v.id == id)
}
