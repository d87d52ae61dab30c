use serde::{Deserialize, Serialize};

/// Network a node reports through its numeric network id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NetworkType {
    Main,
    Ropsten,
    Thoreum,
    ZapChain,
    Callisto,
    Parallax,
    Etica,
    PowLayer,
    Unknown,
}

impl NetworkType {
    /// Network for a known numeric id; anything else is `Unknown`.
    pub fn from_id(id: i32) -> Self {
        match id {
            1 => NetworkType::Main,
            3 => NetworkType::Ropsten,
            357 => NetworkType::Thoreum,
            757 => NetworkType::ZapChain,
            820 => NetworkType::Callisto,
            2110 => NetworkType::Parallax,
            61803 => NetworkType::Etica,
            70707 => NetworkType::PowLayer,
            _ => NetworkType::Unknown,
        }
    }
}

/// Chain variant a node reports through its chain-name string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChainType {
    Main,
    Classic,
    Callisto,
    Thoreum,
    ZapChain,
    Parallax,
    Etica,
    PowLayer,
    Unknown,
}

impl ChainType {
    /// Chain for a reported name, matched case-insensitively; anything else
    /// is `Unknown`.
    pub fn from_name(name: &str) -> Self {
        const NAMES: &[(&str, ChainType)] = &[
            ("main", ChainType::Main),
            ("classic", ChainType::Classic),
            ("callisto", ChainType::Callisto),
            ("thoreum", ChainType::Thoreum),
            ("zapchain", ChainType::ZapChain),
            ("parallax", ChainType::Parallax),
            ("etica", ChainType::Etica),
            ("powlayer", ChainType::PowLayer),
        ];
        for (candidate, chain) in NAMES {
            if name.eq_ignore_ascii_case(candidate) {
                return *chain;
            }
        }
        ChainType::Unknown
    }
}

/// Typed classification of a node's network and chain identification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NetworkClassification {
    pub network: NetworkType,
    pub chain: ChainType,
}

/// Network ids whose deployments reuse generic node software and report a
/// misleading chain name; for these, the numeric id is authoritative and
/// unconditionally overrides the name-based match.
const CHAIN_OVERRIDES: &[(i32, ChainType)] = &[
    (70707, ChainType::PowLayer),
    (757, ChainType::ZapChain),
    (61803, ChainType::Etica),
    (357, ChainType::Thoreum),
    (2110, ChainType::Parallax),
];

/// Map a node's reported network id and chain name strings to typed
/// classifications.
///
/// Total: unparseable or unrecognized input degrades to `Unknown` instead of
/// failing, so callers can apply their own default policy.
pub fn detect_network_and_chain(net_version: &str, chain_name: &str) -> NetworkClassification {
    let network_id = net_version.trim().parse::<i32>().ok();
    let network = network_id.map_or(NetworkType::Unknown, NetworkType::from_id);

    let mut chain = ChainType::from_name(chain_name);
    if let Some(id) = network_id {
        for (override_id, forced) in CHAIN_OVERRIDES {
            if *override_id == id {
                chain = *forced;
            }
        }
    }

    NetworkClassification { network, chain }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unparseable_network_id_degrades_to_unknown() {
        let detected = detect_network_and_chain("not-a-number", "anything");
        assert_eq!(detected.network, NetworkType::Unknown);
        assert_eq!(detected.chain, ChainType::Unknown);
    }

    #[test]
    fn unknown_chain_name_degrades_to_unknown() {
        let detected = detect_network_and_chain("1", "unknownname");
        assert_eq!(detected.network, NetworkType::Main);
        assert_eq!(detected.chain, ChainType::Unknown);
    }

    #[test]
    fn chain_name_match_is_case_insensitive() {
        let detected = detect_network_and_chain("1", "MAIN");
        assert_eq!(detected.network, NetworkType::Main);
        assert_eq!(detected.chain, ChainType::Main);

        let detected = detect_network_and_chain("820", "callisto");
        assert_eq!(detected.network, NetworkType::Callisto);
        assert_eq!(detected.chain, ChainType::Callisto);
    }

    #[test]
    fn network_id_overrides_reported_chain_name() {
        // Each override deployment reports a generic "main"; the id wins.
        let cases = [
            ("70707", NetworkType::PowLayer, ChainType::PowLayer),
            ("757", NetworkType::ZapChain, ChainType::ZapChain),
            ("61803", NetworkType::Etica, ChainType::Etica),
            ("357", NetworkType::Thoreum, ChainType::Thoreum),
            ("2110", NetworkType::Parallax, ChainType::Parallax),
        ];
        for (net_version, network, chain) in cases {
            let detected = detect_network_and_chain(net_version, "main");
            assert_eq!(detected.network, network, "net id {net_version}");
            assert_eq!(detected.chain, chain, "net id {net_version}");
        }
    }

    #[test]
    fn detection_is_total_for_arbitrary_input() {
        for (net_version, chain_name) in [
            ("", ""),
            ("  42  ", "\u{0}"),
            ("99999999999999999999", "main"),
            ("-1", "Classic"),
            ("0x1", "CALLISTO"),
        ] {
            let detected = detect_network_and_chain(net_version, chain_name);
            // No panic and a value either way; spot-check the parse paths.
            if net_version.trim().parse::<i32>().is_err() {
                assert_eq!(detected.network, NetworkType::Unknown);
            }
            let _ = detected.chain;
        }
    }

    #[test]
    fn undefined_numeric_id_is_unknown_without_disturbing_chain() {
        let detected = detect_network_and_chain("424242", "classic");
        assert_eq!(detected.network, NetworkType::Unknown);
        assert_eq!(detected.chain, ChainType::Classic);
    }
}
