//! Identity, contact, web and network generators.

use mockify_core::{Generator, RandomEngine, Result, Value};
use rand::RngCore;
use uuid::Builder;

use super::{GeneratorRegistry, pick};
use crate::data::{
    CITIES, COMPANY_SUFFIXES, COUNTRIES, EMAIL_DOMAINS, FIRST_NAMES, LAST_NAMES, STREET_SUFFIXES,
    TLD,
};

const URL_PATHS: &[&str] = &["", "/about", "/products", "/contact", "/blog", "/api"];
const UPPER_HEX: &[u8] = b"0123456789ABCDEF";

pub fn register(registry: &mut GeneratorRegistry) {
    registry.register(uuid);
    registry.register(email);
    registry.register(first_name);
    registry.register(last_name);
    registry.register(full_name);
    registry.register(username);
    registry.register(url);
    registry.register(|| image_url(640, 480));
    registry.register(avatar_url);
    registry.register(phone);
    registry.register(address);
    registry.register(city);
    registry.register(country);
    registry.register(zip_code);
    registry.register(company);
    registry.register(domain);
    registry.register(ipv4);
    registry.register(mac_address);
    registry.register(hex_color);
    registry.register(rgb_color);
}

/// Version 4 UUID in its hyphenated lowercase form.
pub fn uuid() -> Generator {
    Generator::new("special.uuid", |rng| {
        let mut bytes = [0_u8; 16];
        rng.fill_bytes(&mut bytes);
        Ok(Value::Text(
            Builder::from_random_bytes(bytes).into_uuid().to_string(),
        ))
    })
}

pub fn email() -> Generator {
    Generator::new("special.email", |rng| {
        let first = pick(FIRST_NAMES, rng)?.to_lowercase();
        let last = pick(LAST_NAMES, rng)?.to_lowercase();
        let domain = pick(EMAIL_DOMAINS, rng)?;
        let number = rng.random_int(1, 99);
        let local = match rng.random_int(0, 4) {
            0 => format!("{first}.{last}"),
            1 => format!("{first}{last}"),
            2 => format!("{first}_{last}"),
            3 => format!("{first}{number}"),
            _ => format!("{}{last}", initial(&first)),
        };
        Ok(Value::Text(format!("{local}@{domain}")))
    })
}

pub fn first_name() -> Generator {
    Generator::new("special.first_name", |rng| {
        Ok(Value::from(pick(FIRST_NAMES, rng)?))
    })
}

pub fn last_name() -> Generator {
    Generator::new("special.last_name", |rng| {
        Ok(Value::from(pick(LAST_NAMES, rng)?))
    })
}

pub fn full_name() -> Generator {
    Generator::new("special.full_name", |rng| {
        let first = pick(FIRST_NAMES, rng)?;
        let last = pick(LAST_NAMES, rng)?;
        Ok(Value::Text(format!("{first} {last}")))
    })
}

pub fn username() -> Generator {
    Generator::new("special.username", |rng| {
        let first = pick(FIRST_NAMES, rng)?.to_lowercase();
        let last = pick(LAST_NAMES, rng)?.to_lowercase();
        let wide = rng.random_int(1, 999);
        let narrow = rng.random_int(1, 99);
        let name = match rng.random_int(0, 4) {
            0 => format!("{first}{last}"),
            1 => format!("{first}_{last}"),
            2 => format!("{first}{wide}"),
            3 => format!("{}{last}{narrow}", initial(&first)),
            _ => format!("the{first}"),
        };
        Ok(Value::Text(name))
    })
}

pub fn url() -> Generator {
    Generator::new("special.url", |rng| {
        let host = pick(LAST_NAMES, rng)?.to_lowercase();
        let tld = pick(TLD, rng)?;
        let path = pick(URL_PATHS, rng)?;
        Ok(Value::Text(format!("https://{host}.{tld}{path}")))
    })
}

/// Placeholder image URL of the given size.
pub fn image_url(width: u32, height: u32) -> Generator {
    Generator::new("special.image_url", move |rng| {
        let id = rng.random_int(1, 1000);
        Ok(Value::Text(format!(
            "https://picsum.photos/seed/{id}/{width}/{height}"
        )))
    })
}

pub fn avatar_url() -> Generator {
    Generator::new("special.avatar_url", |rng| {
        let id = rng.random_int(1, 70);
        let gender = if rng.random_bool() { "men" } else { "women" };
        Ok(Value::Text(format!(
            "https://randomuser.me/api/portraits/{gender}/{id}.jpg"
        )))
    })
}

/// North American style number, `(NXX) NXX-XXXX`.
pub fn phone() -> Generator {
    Generator::new("special.phone", |rng| {
        let area = rng.random_int(200, 999);
        let exchange = rng.random_int(200, 999);
        let subscriber = rng.random_int(1000, 9999);
        Ok(Value::Text(format!("({area}) {exchange}-{subscriber}")))
    })
}

pub fn address() -> Generator {
    Generator::new("special.address", |rng| {
        let number = rng.random_int(1, 9999);
        let street = pick(LAST_NAMES, rng)?;
        let suffix = pick(STREET_SUFFIXES, rng)?;
        Ok(Value::Text(format!("{number} {street} {suffix}")))
    })
}

pub fn city() -> Generator {
    Generator::new("special.city", |rng| Ok(Value::from(pick(CITIES, rng)?)))
}

pub fn country() -> Generator {
    Generator::new("special.country", |rng| {
        Ok(Value::from(pick(COUNTRIES, rng)?))
    })
}

pub fn zip_code() -> Generator {
    Generator::new("special.zip_code", |rng| {
        Ok(Value::Text(rng.random_int(10000, 99999).to_string()))
    })
}

pub fn company() -> Generator {
    Generator::new("special.company", |rng| {
        let name = pick(LAST_NAMES, rng)?;
        let suffix = pick(COMPANY_SUFFIXES, rng)?;
        Ok(Value::Text(format!("{name} {suffix}")))
    })
}

pub fn domain() -> Generator {
    Generator::new("special.domain", |rng| {
        let name = pick(LAST_NAMES, rng)?.to_lowercase();
        let tld = pick(TLD, rng)?;
        Ok(Value::Text(format!("{name}.{tld}")))
    })
}

/// IPv4 address avoiding network and broadcast octets at the ends.
pub fn ipv4() -> Generator {
    Generator::new("special.ipv4", |rng| {
        let octets = [
            rng.random_int(1, 255),
            rng.random_int(0, 255),
            rng.random_int(0, 255),
            rng.random_int(1, 254),
        ];
        Ok(Value::Text(
            octets
                .iter()
                .map(i64::to_string)
                .collect::<Vec<_>>()
                .join("."),
        ))
    })
}

pub fn mac_address() -> Generator {
    Generator::new("special.mac_address", |rng| {
        let parts = (0..6)
            .map(|_| upper_hex(rng, 2))
            .collect::<Result<Vec<_>>>()?;
        Ok(Value::Text(parts.join(":")))
    })
}

pub fn hex_color() -> Generator {
    Generator::new("special.hex_color", |rng| {
        Ok(Value::Text(format!("#{}", upper_hex(rng, 6)?)))
    })
}

pub fn rgb_color() -> Generator {
    Generator::new("special.rgb_color", |rng| {
        let red = rng.random_int(0, 255);
        let green = rng.random_int(0, 255);
        let blue = rng.random_int(0, 255);
        Ok(Value::Text(format!("rgb({red}, {green}, {blue})")))
    })
}

fn upper_hex(rng: &mut RandomEngine, length: usize) -> Result<String> {
    (0..length)
        .map(|_| rng.random_pick(UPPER_HEX).map(|byte| char::from(*byte)))
        .collect()
}

fn initial(name: &str) -> String {
    name.chars().next().map(String::from).unwrap_or_default()
}
