//! Fixture-based parser tests
//!
//! Each fixture is captured real output from the platform tool (trimmed to
//! a representative handful of devices). These cover what hand-built inputs
//! tend to miss: annotated identifier values, nested hubs, root controllers
//! without ids, and the odd malformed entry.

use vmusb_core::host::OutputFormat;

mod usb_list {
    use super::*;

    const LSUSB: &str = "\
Bus 002 Device 001: ID 1d6b:0003 Linux Foundation 3.0 root hub
Bus 001 Device 003: ID 046d:c52b Logitech, Inc. Unifying Receiver
Bus 001 Device 004: ID 05e3:0610 Genesys Logic, Inc. Hub
Bus 001 Device 005: ID 0781:5583 SanDisk Corp. Ultra Fit
Bus 001 Device 001: ID 1d6b:0002 Linux Foundation 2.0 root hub
";

    #[test]
    fn test_full_listing() {
        let records = OutputFormat::UsbList.parse(LSUSB);
        assert_eq!(records.len(), 5);
        assert_eq!(records[1].key().as_str(), "046d:c52b");
        assert_eq!(
            records[1].description.as_deref(),
            Some("Logitech, Inc. Unifying Receiver")
        );
        assert_eq!(records[3].key().as_str(), "0781:5583");
    }

    #[test]
    fn test_warning_lines_are_skipped() {
        let noisy = format!(
            "Couldn't open device, some information will be missing\n{}",
            LSUSB
        );
        assert_eq!(OutputFormat::UsbList.parse(&noisy).len(), 5);
    }
}

mod profiler_json {
    use super::*;

    // system_profiler SPUSBDataType -json, annotated vendor ids and all
    const PROFILER: &str = r#"{
  "SPUSBDataType" : [
    {
      "_items" : [
        {
          "_name" : "USB2.0 Hub",
          "bcd_device" : "1.00",
          "location_id" : "0x01100000 / 1",
          "manufacturer" : "Genesys Logic",
          "product_id" : "0x0610",
          "vendor_id" : "0x05e3  (Genesys Logic, Inc.)",
          "_items" : [
            {
              "_name" : "USB Receiver",
              "manufacturer" : "Logitech",
              "product_id" : "0xc52b",
              "vendor_id" : "0x046d  (Logitech Inc.)"
            },
            {
              "_name" : "Ultra Fit",
              "manufacturer" : "SanDisk",
              "product_id" : "0x5583",
              "serial_num" : "4C530001230988123290",
              "vendor_id" : "0x0781  (SanDisk Corporation)"
            }
          ]
        }
      ],
      "_name" : "USB31Bus",
      "host_controller" : "AppleT8103USBXHCI"
    }
  ]
}"#;

    #[test]
    fn test_tree_walk_with_annotated_ids() {
        let records = OutputFormat::ProfilerJson.parse(PROFILER);
        let keys: Vec<_> = records.iter().map(|r| r.key().as_str().to_string()).collect();
        // Hub first (outer), then its children in order; the root
        // controller object has no ids and is skipped
        assert_eq!(keys, ["05e3:0610", "046d:c52b", "0781:5583"]);
        assert_eq!(records[1].description.as_deref(), Some("USB Receiver"));
    }

    #[test]
    fn test_truncated_capture_is_empty_not_fatal() {
        let truncated = &PROFILER[..PROFILER.len() / 2];
        assert!(OutputFormat::ProfilerJson.parse(truncated).is_empty());
    }
}

mod ioreg_tree {
    use super::*;

    // ioreg -p IOUSB -l -w 0, reduced to the fields the parser reads plus
    // typical surrounding noise
    const IOREG: &str = r#"+-o Root  <class IORegistryEntry, id 0x100000100, retain 14>
  +-o AppleT8103USBXHCI@01000000  <class AppleT8103USBXHCI, id 0x10000034e, registered, matched, active>
  | {
  |   "IOClass" = "AppleT8103USBXHCI"
  |   "IOPowerManagement" = {"DevicePowerState"=2}
  | }
  |
  | +-o USB2.0 Hub@01100000  <class IOUSBHostDevice, id 0x100003456, registered, matched, active>
  |   | {
  |   |   "idVendor" = 1507
  |   |   "idProduct" = 1552
  |   |   "bcdDevice" = 256
  |   |   "USB Product Name" = "USB2.0 Hub"
  |   |   "USB Vendor Name" = "Genesys Logic"
  |   | }
  |   +-o USB Receiver@01110000  <class IOUSBHostDevice, id 0x100003789, registered, matched, active>
  |     {
  |       "idVendor" = 0x46d
  |       "idProduct" = 0xc52b
  |       "USB Product Name" = "USB Receiver"
  |     }
"#;

    #[test]
    fn test_tree_contexts_flush_correctly() {
        let records = OutputFormat::IoregTree.parse(IOREG);
        let keys: Vec<_> = records.iter().map(|r| r.key().as_str().to_string()).collect();
        // The XHCI controller has no idVendor/idProduct and is not emitted
        assert_eq!(keys, ["05e3:0610", "046d:c52b"]);
        assert_eq!(records[0].description.as_deref(), Some("USB2.0 Hub"));
        assert_eq!(records[1].description.as_deref(), Some("USB Receiver"));
    }

    #[test]
    fn test_trailing_context_flushes_at_eof() {
        // Capture cut off before the receiver's closing brace
        let cut = IOREG.trim_end().trim_end_matches("|     }").trim_end();
        assert!(cut.ends_with(r#""USB Product Name" = "USB Receiver""#));
        let records = OutputFormat::IoregTree.parse(cut);
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].key().as_str(), "046d:c52b");
    }
}

mod pnp_json {
    use super::*;

    const PNP: &str = r#"[{"InstanceId":"USB\\VID_045E&PID_07A5\\6&2B1C8A94&0&2","FriendlyName":"Microsoft Receiver"},{"InstanceId":"USB\\VID_046D&PID_C52B\\5&31AC4A&0&12","FriendlyName":"USB Composite Device"},{"InstanceId":"USB\\ROOT_HUB30\\4&232C46&0&0","FriendlyName":"USB Root Hub (USB 3.0)"}]"#;

    #[test]
    fn test_compact_array() {
        let records = OutputFormat::PnpJson.parse(PNP);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].key().as_str(), "045e:07a5");
        assert_eq!(records[0].description.as_deref(), Some("Microsoft Receiver"));
        assert_eq!(records[1].key().as_str(), "046d:c52b");
    }

    #[test]
    fn test_single_device_object() {
        let raw = r#"{"InstanceId":"USB\\VID_045E&PID_07A5\\1","FriendlyName":"Microsoft Receiver"}"#;
        let records = OutputFormat::PnpJson.parse(raw);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].key().as_str(), "045e:07a5");
    }

    #[test]
    fn test_error_text_is_empty_not_fatal() {
        let raw = "Get-PnpDevice : The term 'Get-PnpDevice' is not recognized";
        assert!(OutputFormat::PnpJson.parse(raw).is_empty());
    }
}
