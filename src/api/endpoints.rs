// URL builders for the OpenDota endpoints this client talks to

pub fn player_matches(base_url: &str, account_id: u32) -> String {
    format!("{}/players/{}/matches", base_url.trim_end_matches('/'), account_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_player_matches_url() {
        assert_eq!(
            player_matches("https://api.opendota.com/api/", 395662619),
            "https://api.opendota.com/api/players/395662619/matches"
        );
    }
}
