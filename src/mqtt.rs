//! MQTT feed of remote transform commands
//!
//! Connects to a broker, subscribes to one topic and parses each payload as
//! a [`Command`]. Parsed commands are forwarded to the main loop over a
//! channel; the scene itself never leaves the main thread.

use crate::config::MqttConfig;
use crate::remote::Command;
use rumqttc::{Client, Connection, Event, MqttOptions, Packet, QoS};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

const CLIENT_ID: &str = "rasterpad";

/// MQTT client receiving commands on a background thread
pub struct MqttClient {
    receiver: Receiver<Command>,
    _thread: thread::JoinHandle<()>,
}

impl MqttClient {
    /// Connect and subscribe; fails immediately if the broker is unreachable
    pub fn connect(config: &MqttConfig) -> Result<Self, String> {
        let mut options = MqttOptions::new(CLIENT_ID, config.host.as_str(), config.port);
        options.set_keep_alive(Duration::from_secs(30));

        let (client, mut connection) = Client::new(options, 10);

        client
            .subscribe(config.topic.as_str(), QoS::AtMostOnce)
            .map_err(|e| format!("Failed to subscribe to topic '{}': {}", config.topic, e))?;

        // Poll once to fail fast
        match connection.iter().next() {
            Some(Ok(_)) => {},
            Some(Err(e)) => {
                return Err(format!(
                    "Failed to connect to MQTT broker at {}:{} - {}",
                    config.host, config.port, e
                ));
            },
            None => {
                return Err(format!(
                    "Failed to connect to MQTT broker at {}:{} - connection closed",
                    config.host, config.port
                ));
            },
        }

        let (sender, receiver) = mpsc::channel();
        let topic = config.topic.clone();
        let handle = thread::spawn(move || {
            Self::message_loop(connection, &sender, &topic);
        });

        tracing::info!(
            host = %config.host,
            port = config.port,
            topic = %config.topic,
            "MQTT connected"
        );

        Ok(Self {
            receiver,
            _thread: handle,
        })
    }

    fn message_loop(mut connection: Connection, sender: &Sender<Command>, topic: &str) {
        for event in connection.iter() {
            match event {
                Ok(Event::Incoming(Packet::Publish(publish))) if publish.topic == topic => {
                    let Ok(text) = std::str::from_utf8(&publish.payload) else {
                        tracing::warn!("MQTT payload is not UTF-8");
                        continue;
                    };
                    for line in text.lines().filter(|l| !l.trim().is_empty()) {
                        match Command::parse(line) {
                            Ok(command) => {
                                if sender.send(command).is_err() {
                                    // Main thread gone
                                    return;
                                }
                            },
                            Err(e) => tracing::warn!(line, error = %e, "ignoring MQTT command"),
                        }
                    }
                },
                Ok(_) => {},
                Err(e) => {
                    // Connection may recover
                    tracing::error!(error = %e, "MQTT error");
                    thread::sleep(Duration::from_secs(1));
                },
            }
        }
    }

    /// Drain every command received since the last poll
    pub fn poll(&self) -> Vec<Command> {
        self.receiver.try_iter().collect()
    }
}
